//! Read-only analyses over a parsed SARIF log.

pub mod alerts;
pub mod score;

pub use alerts::{AlertLevel, has_alert, has_error_alerts, has_note_alerts, has_warning_alerts};
pub use score::{Tier, max_problem_severity, max_security_score};
