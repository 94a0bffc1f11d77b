//! Security severity scoring.
//!
//! The maximum `security-severity` over all resolvable results is mapped to
//! a coarse tier:
//!
//!   - score >= 9.0  → critical
//!   - score >= 7.0  → high
//!   - score >= 4.0  → medium
//!   - otherwise     → low
//!
//! Each boundary belongs to the higher band. A log with no scored rule
//! reports 0.0 and therefore `low`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sarif::model::SarifLog;
use crate::sarif::resolve::resolve;

/// Categorical problem severity derived from a security score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
    Critical,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            Tier::Critical
        } else if score >= 7.0 {
            Tier::High
        } else if score >= 4.0 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
            Tier::Critical => "critical",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest `security-severity` among resolvable results, or 0.0.
///
/// Every result is visited; a later result may carry a higher score.
pub fn max_security_score(log: &SarifLog) -> f64 {
    let mut max = 0.0_f64;

    for run in &log.runs {
        for result in run.results() {
            let Some(score) = resolve(run, result)
                .rule()
                .and_then(|rule| rule.security_severity())
            else {
                continue;
            };

            if score > max {
                tracing::trace!(rule_id = ?result.rule_id, score, "new maximum score");
                max = score;
            }
        }
    }

    tracing::debug!(max, "security score scan finished");
    max
}

/// Tier of [`max_security_score`].
pub fn max_problem_severity(log: &SarifLog) -> Tier {
    Tier::from_score(max_security_score(log))
}
