//! Pass/fail policy for a gated SARIF log.
//!
//! This module turns already-computed findings into a CI verdict.
//!
//! Responsibilities:
//! - Combine alert flags and the query outcome with the configured switches
//! - Produce reasons in a fixed order
//! - Compute CI-compatible exit codes
//!
//! Non-responsibilities:
//! - Resolving rules or scanning results (handled in `analysis`)
//! - Evaluating queries (handled in `query`)
//!
//! The verdict is FAIL when any switch is on and its condition holds:
//!
//!   - fail_on_any       and any alert level is present
//!   - fail_on_errors    and error alerts are present
//!   - fail_on_warnings  and warning alerts are present
//!   - fail_on_notes     and note alerts are present
//!   - a query is set    and it matched
//!
//! Severity scores never fail the gate on their own; they are published.

use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};
use crate::report::model::{FindingsInfo, QueryInfo, VerdictInfo, VerdictStatus};

/// Switches that decide which findings fail the gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePolicy {
    pub fail_on_any: bool,
    pub fail_on_errors: bool,
    pub fail_on_warnings: bool,
    pub fail_on_notes: bool,
    /// JMESPath query that fails the gate when it matches.
    pub query: Option<String>,
}

impl GatePolicy {
    /// The configured query, with an empty string meaning none.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}

/// Parse a boolean gate input.
///
/// Only `true` and `false` are accepted, in any letter case.
pub fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(GateError::InvalidInput {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Derive the verdict for `findings` under `policy`.
///
/// Exit code mapping:
/// - PASS → 0
/// - FAIL → 1
pub fn evaluate(
    policy: &GatePolicy,
    findings: &FindingsInfo,
    query: Option<&QueryInfo>,
) -> VerdictInfo {
    let mut reasons = Vec::new();

    if policy.fail_on_any && findings.any_alerts() {
        reasons.push("alerts detected and failOnAny is set".to_string());
    }
    if policy.fail_on_errors && findings.error_alerts {
        reasons.push("error alerts detected".to_string());
    }
    if policy.fail_on_warnings && findings.warning_alerts {
        reasons.push("warning alerts detected".to_string());
    }
    if policy.fail_on_notes && findings.note_alerts {
        reasons.push("note alerts detected".to_string());
    }
    if let Some(query) = query.filter(|q| q.matched) {
        reasons.push(format!("query '{}' matched", query.expression));
    }

    if reasons.is_empty() {
        return VerdictInfo::pass();
    }

    tracing::debug!(?reasons, "gate failed");

    VerdictInfo {
        status: VerdictStatus::Fail,
        reasons,
        exit_code: 1,
    }
}
