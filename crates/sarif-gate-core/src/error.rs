//! Error taxonomy for SARIF gating.
//!
//! Only conditions that stop an invocation live here. A result whose rule
//! cannot be resolved is not an error; see [`crate::sarif::resolve`].

use std::path::PathBuf;

/// Failures surfaced to the caller of the gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The input bytes could not be parsed into the SARIF entity hierarchy.
    #[error("malformed SARIF document: {0}")]
    MalformedDocument(String),

    /// The structural query was rejected by the JMESPath evaluator.
    #[error("invalid query '{expression}': {reason}")]
    QuerySyntax { expression: String, reason: String },

    /// The SARIF path handed to the gate does not exist.
    #[error("SARIF file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The SARIF path exists but could not be read.
    #[error("failed to read SARIF file: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A gate input carried a value that cannot be interpreted.
    #[error("Unable to parse the value '{value}' as a boolean for '{name}'")]
    InvalidInput { name: String, value: String },
}

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        GateError::MalformedDocument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
