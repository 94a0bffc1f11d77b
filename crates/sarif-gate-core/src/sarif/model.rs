use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{GateError, Result};
use crate::sarif::lenient;

/// Property key carrying a rule's numeric risk score.
pub const SECURITY_SEVERITY_KEY: &str = "security-severity";

/// Free-form SARIF property bag.
pub type PropertyBag = Map<String, Value>;

/// A parsed SARIF log together with the raw JSON tree it came from.
///
/// The typed [`SarifLog`] only models what rule resolution needs. Structural
/// queries run against `raw`, so they see every field of the input.
/// Neither part is mutated after construction.
#[derive(Debug, Clone)]
pub struct SarifDocument {
    log: SarifLog,
    raw: Value,
}

impl SarifDocument {
    /// Parse a document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(bytes)?;
        Self::from_value(raw)
    }

    /// Build a document from an already-decoded JSON tree.
    pub fn from_value(raw: Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(GateError::MalformedDocument(
                "top-level value must be an object".to_string(),
            ));
        }
        let log = SarifLog::deserialize(&raw)?;
        tracing::debug!(runs = log.runs.len(), "parsed SARIF log");
        Ok(Self { log, raw })
    }

    pub fn log(&self) -> &SarifLog {
        &self.log
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl FromStr for SarifDocument {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

/// Root SARIF entity. `runs` is mandatory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SarifLog {
    pub runs: Vec<Run>,
}

impl SarifLog {
    /// True when at least one run reports a non-empty results array.
    pub fn has_results(&self) -> bool {
        self.runs.iter().any(|run| !run.results().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Run {
    #[serde(default, deserialize_with = "lenient::object")]
    pub tool: Option<Tool>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub results: Option<Vec<SarifResult>>,
}

impl Run {
    pub fn results(&self) -> &[SarifResult] {
        self.results.as_deref().unwrap_or(&[])
    }

    /// Rule-catalog extensions of this run's tool, empty when absent.
    pub fn extensions(&self) -> &[ToolComponent] {
        self.tool
            .as_ref()
            .and_then(|tool| tool.extensions.as_deref())
            .unwrap_or(&[])
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.tool
            .as_ref()
            .and_then(|tool| tool.driver.as_ref())
            .and_then(|driver| driver.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tool {
    #[serde(default, deserialize_with = "lenient::object")]
    pub driver: Option<ToolComponent>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub extensions: Option<Vec<ToolComponent>>,
}

/// A tool driver or extension; extensions act as rule catalogs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolComponent {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub rules: Option<Vec<ReportingDescriptor>>,
}

/// Static rule definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingDescriptor {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub default_configuration: Option<ReportingConfiguration>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub properties: Option<PropertyBag>,
}

impl ReportingDescriptor {
    /// `defaultConfiguration.level`, if the rule declares one.
    pub fn default_level(&self) -> Option<&str> {
        self.default_configuration
            .as_ref()
            .and_then(|config| config.level.as_deref())
    }

    /// Numeric risk score from the property bag.
    ///
    /// Producers emit either a JSON number or a decimal string; both are
    /// accepted. Anything else, including NaN, yields `None`.
    pub fn security_severity(&self) -> Option<f64> {
        let value = self.properties.as_ref()?.get(SECURITY_SEVERITY_KEY)?;
        let score = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        (!score.is_nan()).then_some(score)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportingConfiguration {
    #[serde(default, deserialize_with = "lenient::string")]
    pub level: Option<String>,
}

/// A single finding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    #[serde(default, deserialize_with = "lenient::string")]
    pub rule_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub rule: Option<ReportingDescriptorReference>,
}

/// `(rule index, extension index)` link from a result to its rule.
///
/// SARIF uses `-1` as "not set", so indices stay signed here and are
/// bounds-checked during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingDescriptorReference {
    #[serde(default, deserialize_with = "lenient::index")]
    pub index: Option<i64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub tool_component: Option<ToolComponentReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolComponentReference {
    #[serde(default, deserialize_with = "lenient::index")]
    pub index: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule_with_score(score: Value) -> ReportingDescriptor {
        let mut properties = PropertyBag::new();
        properties.insert(SECURITY_SEVERITY_KEY.to_string(), score);
        ReportingDescriptor {
            properties: Some(properties),
            ..Default::default()
        }
    }

    #[test]
    fn parses_nested_rule_references() {
        let doc = SarifDocument::from_value(json!({
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": { "name": "CodeQL" },
                    "extensions": [{
                        "name": "codeql/js-queries",
                        "rules": [{
                            "id": "js/xss",
                            "defaultConfiguration": { "level": "error" },
                            "properties": { "security-severity": "6.1" }
                        }]
                    }]
                },
                "results": [{
                    "ruleId": "js/xss",
                    "rule": { "index": 0, "toolComponent": { "index": 0 } }
                }]
            }]
        }))
        .unwrap();

        let run = &doc.log().runs[0];
        assert_eq!(run.tool_name(), Some("CodeQL"));
        assert_eq!(run.extensions().len(), 1);

        let rule = &run.extensions()[0].rules.as_ref().unwrap()[0];
        assert_eq!(rule.default_level(), Some("error"));
        assert_eq!(rule.security_severity(), Some(6.1));

        let reference = run.results()[0].rule.as_ref().unwrap();
        assert_eq!(reference.index, Some(0));
        assert_eq!(reference.tool_component.as_ref().unwrap().index, Some(0));
    }

    #[test]
    fn missing_runs_is_malformed() {
        let err = SarifDocument::from_value(json!({ "version": "2.1.0" })).unwrap_err();
        assert!(matches!(err, GateError::MalformedDocument(_)));
        assert!(err.to_string().contains("runs"));
    }

    #[test]
    fn non_object_root_is_malformed() {
        let err = SarifDocument::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, GateError::MalformedDocument(_)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = "{ \"runs\": [".parse::<SarifDocument>().unwrap_err();
        assert!(matches!(err, GateError::MalformedDocument(_)));
    }

    #[test]
    fn runs_with_wrong_type_is_malformed() {
        let err = SarifDocument::from_value(json!({ "runs": "nope" })).unwrap_err();
        assert!(matches!(err, GateError::MalformedDocument(_)));
    }

    #[test]
    fn optional_collections_may_be_absent_or_null() {
        let doc = SarifDocument::from_value(json!({
            "runs": [
                {},
                { "tool": null, "results": null },
                { "tool": { "extensions": null }, "results": [] }
            ]
        }))
        .unwrap();

        for run in &doc.log().runs {
            assert!(run.results().is_empty());
            assert!(run.extensions().is_empty());
            assert_eq!(run.tool_name(), None);
        }
        assert!(!doc.log().has_results());
    }

    #[test]
    fn wrong_typed_informational_fields_read_as_absent() {
        let doc = SarifDocument::from_value(json!({
            "runs": [{
                "tool": {
                    "driver": { "name": ["not", "a", "name"] },
                    "extensions": [{
                        "name": 7,
                        "rules": [{
                            "id": false,
                            "defaultConfiguration": { "level": 3 },
                            "properties": "none"
                        }]
                    }]
                },
                "results": [{ "ruleId": 42, "rule": "r0" }]
            }]
        }))
        .unwrap();

        let run = &doc.log().runs[0];
        assert_eq!(run.tool_name(), None);
        assert_eq!(run.extensions()[0].name, None);

        let rule = &run.extensions()[0].rules.as_ref().unwrap()[0];
        assert_eq!(rule.id, None);
        assert_eq!(rule.default_level(), None);
        assert_eq!(rule.security_severity(), None);

        let result = &run.results()[0];
        assert_eq!(result.rule_id, None);
        assert!(result.rule.is_none());
    }

    #[test]
    fn non_object_rule_keeps_later_rule_positions() {
        let doc = SarifDocument::from_value(json!({
            "runs": [{
                "tool": {
                    "extensions": [{
                        "rules": [12, { "id": "second" }]
                    }]
                },
                "results": ["stray", {}]
            }]
        }))
        .unwrap();

        let run = &doc.log().runs[0];
        let rules = run.extensions()[0].rules.as_ref().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, None);
        assert_eq!(rules[1].id.as_deref(), Some("second"));
        assert_eq!(run.results().len(), 2);
    }

    #[test]
    fn non_object_run_is_malformed() {
        let err = SarifDocument::from_value(json!({ "runs": [1] })).unwrap_err();
        assert!(matches!(err, GateError::MalformedDocument(_)));
    }

    #[test]
    fn has_results_sees_any_non_empty_run() {
        let doc = SarifDocument::from_value(json!({
            "runs": [{ "results": [] }, { "results": [{ "ruleId": "x" }] }]
        }))
        .unwrap();
        assert!(doc.log().has_results());
    }

    #[test]
    fn raw_tree_keeps_unmodeled_fields() {
        let doc = SarifDocument::from_value(json!({
            "$schema": "https://json.schemastore.org/sarif-2.1.0.json",
            "runs": []
        }))
        .unwrap();
        assert_eq!(
            doc.raw()["$schema"],
            "https://json.schemastore.org/sarif-2.1.0.json"
        );
    }

    #[test]
    fn security_severity_accepts_numbers_and_numeric_strings() {
        assert_eq!(rule_with_score(json!(7.5)).security_severity(), Some(7.5));
        assert_eq!(rule_with_score(json!(9)).security_severity(), Some(9.0));
        assert_eq!(rule_with_score(json!(" 4.0 ")).security_severity(), Some(4.0));
    }

    #[test]
    fn security_severity_rejects_non_numeric_values() {
        assert_eq!(rule_with_score(json!("high")).security_severity(), None);
        assert_eq!(rule_with_score(json!("NaN")).security_severity(), None);
        assert_eq!(rule_with_score(json!(true)).security_severity(), None);
        assert_eq!(rule_with_score(json!({ "v": 1 })).security_severity(), None);
        assert_eq!(ReportingDescriptor::default().security_severity(), None);
    }
}
