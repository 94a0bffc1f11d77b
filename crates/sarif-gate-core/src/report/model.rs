use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::analysis::Tier;

/// Top-level gate report.
///
/// This is the JSON contract consumed by CI: every derived value the gate
/// publishes lives here. It is deterministic for identical input bytes and
/// policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub artifact: ArtifactInfo,
    pub findings: FindingsInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryInfo>,
    pub verdict: VerdictInfo,
}

impl Report {
    pub fn new(
        tool: ToolInfo,
        artifact: ArtifactInfo,
        findings: FindingsInfo,
        query: Option<QueryInfo>,
        verdict: VerdictInfo,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            artifact,
            findings,
            query,
            verdict,
        }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// The SARIF input bound to this report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub path: Option<String>,
    pub size_bytes: u64,
    pub hash: ArtifactHash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHash {
    pub algorithm: String,
    pub value: String,
}

/// Answers derived from the SARIF log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FindingsInfo {
    pub has_results: bool,
    pub error_alerts: bool,
    pub warning_alerts: bool,
    pub note_alerts: bool,
    pub max_security_score: f64,
    pub max_problem_severity: Tier,
}

impl FindingsInfo {
    /// True when an alert exists at any of the three levels.
    pub fn any_alerts(&self) -> bool {
        self.error_alerts || self.warning_alerts || self.note_alerts
    }
}

/// Outcome of the configured structural query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryInfo {
    pub expression: String,
    pub matched: bool,
}

/// Final gate status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictStatus::Pass => f.write_str("PASS"),
            VerdictStatus::Fail => f.write_str("FAIL"),
        }
    }
}

/// Final verdict block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerdictInfo {
    pub status: VerdictStatus,
    pub reasons: Vec<String>,
    pub exit_code: i32,
}

impl VerdictInfo {
    pub fn pass() -> Self {
        Self {
            status: VerdictStatus::Pass,
            reasons: vec![],
            exit_code: 0,
        }
    }
}
