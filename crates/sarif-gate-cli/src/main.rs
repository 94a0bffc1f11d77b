use anyhow::{Context, Result};
use clap::Parser;

use sarif_gate_core::{TOOL_NAME, inspect};
use sarif_gate_core::report::{model::ToolInfo, render};

mod args;
mod logging;

fn main() -> Result<()> {
    let args = args::Args::parse();

    logging::init_tracing(&args.log_level, args.log_format)?;

    let policy = args.policy()?;
    tracing::debug!(?policy, sarif_file = %args.sarif_file.display(), "gate configured");

    let tool = ToolInfo {
        name: TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let report = inspect(&args.sarif_file, tool, &policy)
        .with_context(|| format!("failed to gate {}", args.sarif_file.display()))?;

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => render::render_text(&report),
    };

    match args.out {
        Some(path) => std::fs::write(&path, &output)
            .with_context(|| format!("failed to write report: {}", path.display()))?,
        None => print!("{output}"),
    }

    std::process::exit(report.verdict.exit_code);
}
