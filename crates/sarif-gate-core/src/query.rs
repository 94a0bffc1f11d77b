//! JMESPath queries against the raw SARIF tree.
//!
//! Evaluation belongs to the `jmespath` crate. This module only decides
//! whether what came back counts as "something matched":
//!
//!   - null          → false
//!   - array         → non-empty
//!   - string        → non-empty
//!   - anything else → false (it has no length)
//!
//! Emptiness is a property of the returned value, not of the findings it
//! describes. A projection such as `runs[*].results` over runs with empty
//! result arrays returns `[[]]`, which is non-empty.

use jmespath::Variable;

use crate::error::{GateError, Result};
use crate::sarif::model::SarifDocument;

/// Evaluate `query` over the whole document and report non-emptiness.
///
/// Syntax and evaluation errors are returned as [`GateError::QuerySyntax`].
pub fn query_non_empty(doc: &SarifDocument, query: &str) -> Result<bool> {
    tracing::debug!(query, "running query");

    let syntax_error = |err: jmespath::JmespathError| GateError::QuerySyntax {
        expression: query.to_string(),
        reason: err.to_string(),
    };

    let expression = jmespath::compile(query).map_err(syntax_error)?;
    let result = expression.search(doc.raw()).map_err(syntax_error)?;

    let matched = match &*result {
        Variable::Null => {
            tracing::debug!(query, "query result is null");
            false
        }
        Variable::Array(items) => !items.is_empty(),
        Variable::String(s) => !s.is_empty(),
        _ => false,
    };

    tracing::debug!(query, matched, "query finished");
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> SarifDocument {
        SarifDocument::from_value(json!({
            "version": "2.1.0",
            "runs": [{
                "tool": { "driver": { "name": "scanner" } },
                "results": [
                    { "ruleId": "a", "level": "error" },
                    { "ruleId": "b", "level": "note" }
                ]
            }]
        }))
        .unwrap()
    }

    fn empty_runs_document() -> SarifDocument {
        SarifDocument::from_value(json!({
            "runs": [{ "results": [] }, { "results": [] }]
        }))
        .unwrap()
    }

    #[test]
    fn projection_with_results_is_non_empty() {
        assert!(query_non_empty(&document(), "runs[*].results").unwrap());
    }

    #[test]
    fn projection_over_empty_results_is_still_non_empty() {
        let doc = empty_runs_document();
        assert!(!doc.log().has_results());
        assert!(query_non_empty(&doc, "runs[*].results").unwrap());
    }

    #[test]
    fn flattened_empty_results_are_empty() {
        assert!(!query_non_empty(&empty_runs_document(), "runs[*].results[]").unwrap());
    }

    #[test]
    fn filter_selects_matching_results() {
        let doc = document();
        assert!(query_non_empty(&doc, "runs[].results[?level=='error']").unwrap());
        assert!(!query_non_empty(&doc, "runs[].results[?level=='warning'][]").unwrap());
    }

    #[test]
    fn null_result_is_empty() {
        assert!(!query_non_empty(&document(), "missing.field").unwrap());
    }

    #[test]
    fn strings_use_their_length() {
        let doc = document();
        assert!(query_non_empty(&doc, "version").unwrap());
        assert!(!query_non_empty(&doc, "''").unwrap());
    }

    #[test]
    fn values_without_length_are_empty() {
        let doc = document();
        assert!(!query_non_empty(&doc, "runs[0].tool").unwrap());
        assert!(!query_non_empty(&doc, "length(runs)").unwrap());
        assert!(!query_non_empty(&doc, "`true`").unwrap());
    }

    #[test]
    fn malformed_query_is_surfaced() {
        let err = query_non_empty(&document(), "runs[*.results").unwrap_err();
        match err {
            GateError::QuerySyntax { expression, reason } => {
                assert_eq!(expression, "runs[*.results");
                assert!(!reason.is_empty());
            }
            other => panic!("expected QuerySyntax, got {other:?}"),
        }
    }

    #[test]
    fn queries_do_not_mutate_the_document() {
        let doc = document();
        let before = doc.raw().clone();
        query_non_empty(&doc, "runs[*].results").unwrap();
        query_non_empty(&doc, "runs[0]").unwrap();
        assert_eq!(doc.raw(), &before);
    }
}
