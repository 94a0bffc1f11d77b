//! Alert classification by rule severity level.
//!
//! A result raises an alert at `level` when its rule resolves and the
//! rule's `defaultConfiguration.level` equals `level`. The level of the
//! result itself is not consulted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sarif::model::SarifLog;
use crate::sarif::resolve::resolve;

/// The three SARIF levels the gate can fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Note,
    Warning,
    Error,
}

impl AlertLevel {
    pub const ALL: [AlertLevel; 3] = [AlertLevel::Error, AlertLevel::Warning, AlertLevel::Note];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Note => "note",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether any resolvable result in any run has a rule at `level`.
///
/// Scanning stops at the first match across the whole log. Levels outside
/// the SARIF vocabulary are accepted and simply never match.
pub fn has_alert(log: &SarifLog, level: &str) -> bool {
    tracing::debug!(level, "scanning for alerts");

    let found = log.runs.iter().any(|run| {
        run.results().iter().any(|result| {
            resolve(run, result)
                .rule()
                .and_then(|rule| rule.default_level())
                == Some(level)
        })
    });

    tracing::debug!(level, found, "alert scan finished");
    found
}

pub fn has_error_alerts(log: &SarifLog) -> bool {
    has_alert(log, AlertLevel::Error.as_str())
}

pub fn has_warning_alerts(log: &SarifLog) -> bool {
    has_alert(log, AlertLevel::Warning.as_str())
}

pub fn has_note_alerts(log: &SarifLog) -> bool {
    has_alert(log, AlertLevel::Note.as_str())
}
