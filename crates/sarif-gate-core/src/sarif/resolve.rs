//! Rule resolution for SARIF results.
//!
//! A result does not carry its rule inline. It points at it through two
//! indices: `rule.toolComponent.index` selects an extension of the run's
//! tool, and `rule.index` selects a rule inside that extension. Any hop may
//! be missing or out of range.
//!
//! [`resolve`] walks that chain in one place and returns a tagged
//! [`Resolution`]. Callers branch on the tag; they never inspect the
//! intermediate links themselves.
//!
//! An unresolved reference is an ordinary outcome. It is traced at `trace`
//! level and never reported as an error.

use std::fmt;

use crate::sarif::model::{ReportingDescriptor, Run, SarifResult};

/// Outcome of resolving a result's rule.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    Resolved(&'a ReportingDescriptor),
    Unresolved(Unresolved),
}

impl<'a> Resolution<'a> {
    /// The resolved rule, if any.
    pub fn rule(self) -> Option<&'a ReportingDescriptor> {
        match self {
            Resolution::Resolved(rule) => Some(rule),
            Resolution::Unresolved(_) => None,
        }
    }
}

/// The first hop of the chain that was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    NoRuleReference,
    NoRuleIndex,
    NoExtensionIndex,
    ExtensionOutOfBounds { index: i64, available: usize },
    NoRules { extension: usize },
    RuleOutOfBounds { index: i64, available: usize },
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NoRuleReference => write!(f, "result has no rule reference"),
            Unresolved::NoRuleIndex => write!(f, "rule reference has no index"),
            Unresolved::NoExtensionIndex => write!(f, "rule reference has no tool component index"),
            Unresolved::ExtensionOutOfBounds { index, available } => write!(
                f,
                "tool component index {index} outside {available} extension(s)"
            ),
            Unresolved::NoRules { extension } => {
                write!(f, "extension {extension} declares no rules")
            }
            Unresolved::RuleOutOfBounds { index, available } => {
                write!(f, "rule index {index} outside {available} rule(s)")
            }
        }
    }
}

/// Find the rule definition that `result` refers to inside `run`.
///
/// Guards are checked in order and the first missing hop wins:
/// reference, rule index, extension index, extension bounds, rule list,
/// rule bounds.
pub fn resolve<'a>(run: &'a Run, result: &SarifResult) -> Resolution<'a> {
    let outcome = walk(run, result);
    if let Err(reason) = outcome {
        tracing::trace!(rule_id = ?result.rule_id, %reason, "rule unresolved");
    }
    match outcome {
        Ok(rule) => Resolution::Resolved(rule),
        Err(reason) => Resolution::Unresolved(reason),
    }
}

fn walk<'a>(
    run: &'a Run,
    result: &SarifResult,
) -> Result<&'a ReportingDescriptor, Unresolved> {
    let reference = result.rule.as_ref().ok_or(Unresolved::NoRuleReference)?;
    let rule_index = reference.index.ok_or(Unresolved::NoRuleIndex)?;
    let extension_index = reference
        .tool_component
        .as_ref()
        .and_then(|component| component.index)
        .ok_or(Unresolved::NoExtensionIndex)?;

    let extensions = run.extensions();
    let (slot, extension) = position(extension_index)
        .and_then(|i| extensions.get(i).map(|extension| (i, extension)))
        .ok_or(Unresolved::ExtensionOutOfBounds {
            index: extension_index,
            available: extensions.len(),
        })?;

    let rules = extension
        .rules
        .as_deref()
        .ok_or(Unresolved::NoRules { extension: slot })?;

    position(rule_index)
        .and_then(|i| rules.get(i))
        .ok_or(Unresolved::RuleOutOfBounds {
            index: rule_index,
            available: rules.len(),
        })
}

fn position(index: i64) -> Option<usize> {
    usize::try_from(index).ok()
}
