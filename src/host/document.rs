// SPDX-License-Identifier: MIT

//! Host documents as seen by hooks
//!
//! The host owns actors and items; hooks only ever read them. Document data
//! is kept as the raw JSON tree the host persists.

use serde_json::Value;
use std::sync::Arc;

/// A character or creature that items attach to
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    data: Value,
}

impl Actor {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Display name, if the document carries one
    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    /// Full document data (e.g. `system.abilities.cha.value`)
    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// An inventory or ability entity, possibly owned by an actor
#[derive(Debug, Clone)]
pub struct Item {
    data: Value,
    parent: Option<Arc<Actor>>,
}

impl Item {
    /// Create an unowned item (world or compendium item)
    pub fn new(data: Value) -> Self {
        Self { data, parent: None }
    }

    /// Create an item embedded in an actor
    pub fn embedded(data: Value, parent: Arc<Actor>) -> Self {
        Self {
            data,
            parent: Some(parent),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    pub fn parent(&self) -> Option<&Actor> {
        self.parent.as_deref()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Read `flags.<scope>.<key>` from the item source data
    pub fn flag(&self, scope: &str, key: &str) -> Option<&Value> {
        flag_in(&self.data, scope, key)
    }
}

/// The user performing a document operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub is_gm: bool,
}

impl User {
    pub fn player(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_gm: false,
        }
    }

    pub fn gm(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_gm: true,
        }
    }
}

/// Read `flags.<scope>.<key>` from any document-shaped value.
///
/// Null is reported as absent so callers can fall back to another source.
pub fn flag_in<'a>(data: &'a Value, scope: &str, key: &str) -> Option<&'a Value> {
    data.get("flags")?
        .get(scope)?
        .get(key)
        .filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actor_name() {
        let actor = Actor::new(json!({"name": "Seren", "system": {}}));
        assert_eq!(actor.name(), Some("Seren"));

        let nameless = Actor::new(json!({"system": {}}));
        assert_eq!(nameless.name(), None);
    }

    #[test]
    fn test_item_parent() {
        let actor = Arc::new(Actor::new(json!({"name": "Seren"})));
        let owned = Item::embedded(json!({"name": "Sword"}), actor.clone());
        assert_eq!(owned.parent(), Some(actor.as_ref()));

        let loose = Item::new(json!({"name": "Sword"}));
        assert!(loose.parent().is_none());
    }

    #[test]
    fn test_item_flag() {
        let item = Item::new(json!({
            "name": "Feat",
            "flags": {"theia": {"prereqs": [{"path": "a", "op": ">", "value": 1}]}}
        }));
        let rules = item.flag("theia", "prereqs").unwrap();
        assert!(rules.is_array());
        assert!(item.flag("theia", "other").is_none());
        assert!(item.flag("dnd5e", "prereqs").is_none());
    }

    #[test]
    fn test_null_flag_is_absent() {
        let data = json!({"flags": {"theia": {"prereqs": null}}});
        assert!(flag_in(&data, "theia", "prereqs").is_none());
    }

    #[test]
    fn test_user_constructors() {
        assert!(User::gm("gm1").is_gm);
        assert!(!User::player("p1").is_gm);
        assert_eq!(User::player("p1").id, "p1");
    }
}
