// SPDX-License-Identifier: MIT

//! Dotted-path lookup into actor data (e.g. `system.abilities.cha.value`)

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const LENGTH: &str = "length";

/// Why a path string could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// A validated dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment(path.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walk the path from `root`.
    ///
    /// Returns `None` when any segment is missing, when a scalar is walked
    /// through, or when the final value is null. A `length` segment on an
    /// array or string yields its length as an owned number.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<Cow<'a, Value>> {
        let mut current = Cow::Borrowed(root);
        for segment in &self.segments {
            current = match current {
                Cow::Borrowed(value) => step(value, segment)?,
                // Only lengths are owned, and numbers have no fields
                Cow::Owned(_) => return None,
            };
        }
        (!current.is_null()).then_some(current)
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<Cow<'a, Value>> {
    match value {
        Value::Object(map) => map.get(segment).map(Cow::Borrowed),
        Value::Array(items) if segment == LENGTH => Some(Cow::Owned(items.len().into())),
        Value::Array(items) => items.get(array_index(segment)?).map(Cow::Borrowed),
        Value::String(s) if segment == LENGTH => {
            Some(Cow::Owned(s.encode_utf16().count().into()))
        }
        _ => None,
    }
}

/// Canonical decimal index only: "01" and "+1" name properties, not slots
fn array_index(segment: &str) -> Option<usize> {
    let idx: usize = segment.parse().ok()?;
    (idx.to_string() == segment).then_some(idx)
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Resolve a dotted path string; malformed paths resolve to nothing
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<Cow<'a, Value>> {
    FieldPath::parse(path).ok()?.resolve(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actor() -> Value {
        json!({
            "name": "Seren",
            "system": {
                "abilities": {
                    "cha": {"value": 14, "mod": 2},
                    "str": {"value": null}
                },
                "details": {"level": 3, "race": "elf"},
                "classes": [{"name": "bard", "levels": 3}]
            }
        })
    }

    #[test]
    fn test_nested_lookup() {
        let data = actor();
        assert_eq!(resolve(&data, "system.abilities.cha.value").as_deref(), Some(&json!(14)));
        assert_eq!(resolve(&data, "system.details.race").as_deref(), Some(&json!("elf")));
        assert_eq!(resolve(&data, "name").as_deref(), Some(&json!("Seren")));
    }

    #[test]
    fn test_missing_intermediate_segment() {
        let data = actor();
        assert_eq!(resolve(&data, "system.spells.slot1.value"), None);
        assert_eq!(resolve(&data, "flags.theia"), None);
    }

    #[test]
    fn test_walking_through_scalar() {
        let data = actor();
        assert_eq!(resolve(&data, "system.details.level.value"), None);
        assert_eq!(resolve(&data, "system.details.level.length"), None);
        assert_eq!(resolve(&data, "name.first"), None);
    }

    #[test]
    fn test_length_of_arrays_and_strings() {
        let data = json!({
            "name": "Séren",
            "emoji": "🐉",
            "system": {
                "classes": ["bard", "rogue"],
                "spells": {"length": "long"},
                "feats": []
            }
        });
        assert_eq!(resolve(&data, "system.classes.length"), Some(Cow::Owned(json!(2))));
        assert_eq!(resolve(&data, "system.feats.length").as_deref(), Some(&json!(0)));
        assert_eq!(resolve(&data, "name.length").as_deref(), Some(&json!(5)));
        assert_eq!(resolve(&data, "emoji.length").as_deref(), Some(&json!(2)));
        assert_eq!(resolve(&data, "system.spells.length").as_deref(), Some(&json!("long")));
        assert_eq!(resolve(&data, "system.classes.length.value"), None);
        assert_eq!(resolve(&data, "system.classes.1.length").as_deref(), Some(&json!(5)));
    }

    #[test]
    fn test_null_leaf_is_absent() {
        let data = actor();
        assert_eq!(resolve(&data, "system.abilities.str.value"), None);
    }

    #[test]
    fn test_array_index() {
        let data = actor();
        assert_eq!(resolve(&data, "system.classes.0.name").as_deref(), Some(&json!("bard")));
        assert_eq!(resolve(&data, "system.classes.1.name"), None);
        assert_eq!(resolve(&data, "system.classes.01.name"), None);
        assert_eq!(resolve(&data, "system.classes.first"), None);
    }

    #[test]
    fn test_object_leaf() {
        let data = actor();
        assert_eq!(
            resolve(&data, "system.abilities.cha").as_deref(),
            Some(&json!({"value": 14, "mod": 2}))
        );
    }

    #[test]
    fn test_malformed_paths() {
        assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
        assert_eq!(
            FieldPath::parse("system..cha"),
            Err(PathError::EmptySegment("system..cha".to_string()))
        );
        assert!(FieldPath::parse("system.").is_err());
        assert!(FieldPath::parse(".system").is_err());
        assert_eq!(resolve(&actor(), "system..cha"), None);
    }

    #[test]
    fn test_parse_and_display() {
        let path: FieldPath = "system.abilities.cha.value".parse().unwrap();
        assert_eq!(path.segments().len(), 4);
        assert_eq!(path.to_string(), "system.abilities.cha.value");
    }
}
