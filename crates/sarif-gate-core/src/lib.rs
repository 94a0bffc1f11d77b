pub mod analysis;
pub mod error;
pub mod gate;
pub mod query;
pub mod report;
pub mod sarif;

use std::path::Path;

pub use error::{GateError, Result};

use analysis::{
    has_error_alerts, has_note_alerts, has_warning_alerts, max_problem_severity,
    max_security_score,
};
use gate::GatePolicy;
use report::model::{FindingsInfo, QueryInfo, Report, ToolInfo};
use sarif::read::{SarifInput, read_input};
use sarif::{SarifDocument, SarifLog};

pub const TOOL_NAME: &str = "sarif-gate";

/// JSON schema version of gate reports.
/// Bump only when the report shape changes semantically.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Compute every published answer about `log`.
pub fn summarize(log: &SarifLog) -> FindingsInfo {
    FindingsInfo {
        has_results: log.has_results(),
        error_alerts: has_error_alerts(log),
        warning_alerts: has_warning_alerts(log),
        note_alerts: has_note_alerts(log),
        max_security_score: max_security_score(log),
        max_problem_severity: max_problem_severity(log),
    }
}

/// Read, parse and gate the SARIF file at `path`.
pub fn inspect(path: &Path, tool: ToolInfo, policy: &GatePolicy) -> Result<Report> {
    let input = read_input(path)?;
    inspect_input(input, tool, policy)
}

/// Gate SARIF bytes that are already in memory.
pub fn inspect_bytes(bytes: Vec<u8>, tool: ToolInfo, policy: &GatePolicy) -> Result<Report> {
    inspect_input(SarifInput::from_bytes(bytes), tool, policy)
}

fn inspect_input(input: SarifInput, tool: ToolInfo, policy: &GatePolicy) -> Result<Report> {
    let doc = SarifDocument::from_slice(&input.bytes)?;

    let findings = summarize(doc.log());

    let query = match policy.query() {
        Some(expression) => Some(QueryInfo {
            expression: expression.to_string(),
            matched: query::query_non_empty(&doc, expression)?,
        }),
        None => None,
    };

    let verdict = gate::evaluate(policy, &findings, query.as_ref());

    tracing::debug!(
        status = %verdict.status,
        max_security_score = findings.max_security_score,
        "gate evaluated"
    );

    Ok(Report::new(
        tool,
        input.into_artifact(),
        findings,
        query,
        verdict,
    ))
}
