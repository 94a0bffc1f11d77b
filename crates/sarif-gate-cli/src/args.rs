use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sarif_gate_core::gate::{GatePolicy, parse_flag};

/// Gate inputs may come from flags or from the `INPUT_*` variables a CI
/// runner exports for action inputs.
#[derive(Debug, Parser)]
#[command(
    name = "sarif-gate",
    version,
    about = "Fail CI when a SARIF log reports alerts or matches a JMESPath query"
)]
pub struct Args {
    /// Path to the SARIF log
    #[arg(env = "INPUT_SARIFFILE")]
    pub sarif_file: PathBuf,

    /// Fail when any error, warning or note alert exists (true|false)
    #[arg(
        long,
        env = "INPUT_FAILONANY",
        default_value = "false",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub fail_on_any: String,

    /// Fail when error alerts exist (true|false)
    #[arg(
        long,
        env = "INPUT_FAILONERRORS",
        default_value = "false",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub fail_on_errors: String,

    /// Fail when warning alerts exist (true|false)
    #[arg(
        long,
        env = "INPUT_FAILONWARNINGS",
        default_value = "false",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub fail_on_warnings: String,

    /// Fail when note alerts exist (true|false)
    #[arg(
        long,
        env = "INPUT_FAILONNOTES",
        default_value = "false",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub fail_on_notes: String,

    /// JMESPath query; the gate fails when it returns a non-empty value
    #[arg(long, env = "INPUT_JMESPATHQUERY")]
    pub query: Option<String>,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log line format (written to stderr)
    #[arg(long, default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Args {
    /// Validate the boolean inputs and build the gate policy.
    ///
    /// An empty value counts as unset, since runners export empty strings
    /// for inputs that were not given.
    pub fn policy(&self) -> sarif_gate_core::Result<GatePolicy> {
        let flag = |name: &str, value: &str| {
            if value.is_empty() {
                Ok(false)
            } else {
                parse_flag(name, value)
            }
        };

        Ok(GatePolicy {
            fail_on_any: flag("failOnAny", &self.fail_on_any)?,
            fail_on_errors: flag("failOnErrors", &self.fail_on_errors)?,
            fail_on_warnings: flag("failOnWarnings", &self.fail_on_warnings)?,
            fail_on_notes: flag("failOnNotes", &self.fail_on_notes)?,
            query: self.query.clone(),
        })
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}
