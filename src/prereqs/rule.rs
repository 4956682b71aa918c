// SPDX-License-Identifier: MIT

//! Prerequisite rule records
//!
//! Rules are authored by hand into item flags, so decoding is lenient: each
//! field is read on its own and anything missing or of the wrong type is
//! treated as absent for evaluation. Raw field values are kept so a failing
//! rule is described as it was written. A broken entry still becomes a `Rule`,
//! which then fails evaluation instead of aborting the whole check.

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::compare::{display_value, is_truthy, CompareOp};
use super::path::{FieldPath, PathError};

/// A single prerequisite as stored on an item
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<Value>,
    /// Kept even when null: comparing against null differs from a missing value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,
}

impl Rule {
    pub fn new(path: impl Into<String>, op: impl Into<String>, value: Value) -> Self {
        Self {
            path: Some(Value::String(path.into())),
            op: Some(Value::String(op.into())),
            value: Some(value),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(Value::String(label.into()));
        self
    }

    /// Decode one entry of the rule array
    pub fn from_value(entry: &Value) -> Self {
        let field = |key: &str| entry.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            path: field("path"),
            op: field("op"),
            value: entry.get("value").cloned(),
            label: field("label"),
        }
    }

    /// The path, unless missing, empty or not a string
    pub fn path(&self) -> Option<&str> {
        text(self.path.as_ref())
    }

    /// The operator symbol, unless missing, empty or not a string
    pub fn op(&self) -> Option<&str> {
        text(self.op.as_ref())
    }

    /// The display label, when set to anything truthy
    pub fn label(&self) -> Option<String> {
        self.label
            .as_ref()
            .filter(|l| is_truthy(l))
            .map(display_value)
    }

    /// Expected value; an explicit null counts as absent
    pub fn expected(&self) -> Option<&Value> {
        self.value.as_ref().filter(|v| !v.is_null())
    }

    /// Authoring problems with this rule, in field order
    pub fn issues(&self) -> Vec<RuleIssue> {
        let mut issues = Vec::new();
        match self.path() {
            None => issues.push(RuleIssue::MissingPath),
            Some(path) => {
                if let Err(e) = FieldPath::parse(path) {
                    issues.push(RuleIssue::InvalidPath(e));
                }
            }
        }
        match self.op() {
            None => issues.push(RuleIssue::MissingOp),
            Some(op) if CompareOp::parse(op).is_none() => {
                issues.push(RuleIssue::UnknownOp(op.to_string()))
            }
            Some(_) => {}
        }
        if self.value.is_none() {
            issues.push(RuleIssue::MissingValue);
        }
        issues
    }
}

fn text(field: Option<&Value>) -> Option<&str> {
    field.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Decode a rule array. Returns `None` when the value is not an array.
pub fn rules_from_value(value: &Value) -> Option<Vec<Rule>> {
    value
        .as_array()
        .map(|entries| entries.iter().map(Rule::from_value).collect())
}

/// Problems a rule author should fix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleIssue {
    #[error("missing path")]
    MissingPath,
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),
    #[error("missing operator")]
    MissingOp,
    #[error("unknown operator '{0}'")]
    UnknownOp(String),
    #[error("missing expected value")]
    MissingValue,
}

/// Well-formed rule shape, used for schema generation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleSpec {
    /// Dotted path into the actor data, e.g. `system.abilities.cha.value`
    pub path: String,
    /// Comparison operator
    pub op: CompareOp,
    /// Expected value: number, string or boolean
    pub value: Value,
    /// Text shown instead of the generated description when the rule fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<RuleSpec> for Rule {
    fn from(spec: RuleSpec) -> Self {
        Self {
            path: Some(Value::String(spec.path)),
            op: Some(Value::String(spec.op.symbol().to_string())),
            value: Some(spec.value),
            label: spec.label.map(Value::String),
        }
    }
}

/// JSON Schema for a single rule entry
pub fn rule_schema() -> RootSchema {
    schemars::schema_for!(RuleSpec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_rule() {
        let rule = Rule::from_value(&json!({
            "path": "system.abilities.cha.value",
            "op": ">=",
            "value": 13,
            "label": "Charisma 13"
        }));
        assert_eq!(rule.path(), Some("system.abilities.cha.value"));
        assert_eq!(rule.op(), Some(">="));
        assert_eq!(rule.expected(), Some(&json!(13)));
        assert_eq!(rule.label().as_deref(), Some("Charisma 13"));
        assert!(rule.issues().is_empty());
    }

    #[test]
    fn test_decode_is_lenient() {
        let rule = Rule::from_value(&json!({"path": 5, "op": ["<"], "label": 3}));
        assert_eq!(rule.path(), None);
        assert_eq!(rule.op(), None);
        assert_eq!(rule.path, Some(json!(5)));
        assert_eq!(rule.label().as_deref(), Some("3"));
        assert_eq!(rule.value, None);

        let rule = Rule::from_value(&json!({"path": null, "label": 0}));
        assert_eq!(rule.path, None);
        assert_eq!(rule.label(), None);

        let rule = Rule::from_value(&json!(null));
        assert_eq!(rule, Rule::default());

        let rule = Rule::from_value(&json!("system.level >= 3"));
        assert_eq!(rule, Rule::default());
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let rule = Rule::from_value(&json!({"path": "", "op": "", "value": 1, "label": ""}));
        assert_eq!(rule.path(), None);
        assert_eq!(rule.op(), None);
        assert_eq!(rule.label(), None);
    }

    #[test]
    fn test_null_value_is_absent() {
        let rule = Rule::from_value(&json!({"path": "a", "op": "==", "value": null}));
        assert_eq!(rule.value, Some(Value::Null));
        assert_eq!(rule.expected(), None);
    }

    #[test]
    fn test_null_value_is_not_an_issue() {
        let rule = Rule::from_value(&json!({"path": "system.details.level", "op": ">=", "value": null}));
        assert!(rule.issues().is_empty());

        let rule = Rule::from_value(&json!({"path": "system.details.level", "op": ">="}));
        assert_eq!(rule.issues(), vec![RuleIssue::MissingValue]);
    }

    #[test]
    fn test_rules_from_value() {
        let rules = rules_from_value(&json!([
            {"path": "a", "op": ">", "value": 1},
            null
        ]))
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], Rule::new("a", ">", json!(1)));

        assert!(rules_from_value(&json!({"path": "a"})).is_none());
        assert!(rules_from_value(&json!("a > 1")).is_none());
        assert_eq!(rules_from_value(&json!([])), Some(vec![]));
    }

    #[test]
    fn test_issues() {
        assert_eq!(
            Rule::default().issues(),
            vec![
                RuleIssue::MissingPath,
                RuleIssue::MissingOp,
                RuleIssue::MissingValue
            ]
        );
        assert_eq!(
            Rule::new("system..level", "=>", json!(3)).issues(),
            vec![
                RuleIssue::InvalidPath(PathError::EmptySegment("system..level".to_string())),
                RuleIssue::UnknownOp("=>".to_string()),
            ]
        );
        assert_eq!(
            RuleIssue::UnknownOp("=>".to_string()).to_string(),
            "unknown operator '=>'"
        );
    }

    #[test]
    fn test_spec_into_rule() {
        let spec: RuleSpec = serde_json::from_value(json!({
            "path": "system.details.level",
            "op": ">=",
            "value": 4
        }))
        .unwrap();
        let rule: Rule = spec.into();
        assert_eq!(rule, Rule::new("system.details.level", ">=", json!(4)));
    }

    #[test]
    fn test_schema_lists_operators() {
        let schema = serde_json::to_value(rule_schema()).unwrap();
        let text = schema.to_string();
        for op in CompareOp::ALL {
            assert!(text.contains(&format!("\"{}\"", op.symbol())), "{}", op);
        }
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("path")));
        assert!(required.contains(&json!("op")));
        assert!(!required.contains(&json!("label")));
    }
}
