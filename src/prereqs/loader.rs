//! Document loader - exported actor/item files
//!
//! Reads host documents exported as JSON (the host's native export format)
//! or YAML, for dry runs outside the host.

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{DocumentError, PrereqError};
use crate::host::{Actor, Item};

/// Loads exported host documents from disk
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load any document as a JSON object, picking the format from the extension
    pub fn load_value<P: AsRef<Path>>(&self, path: P) -> Result<Value, PrereqError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let label = path.display().to_string();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") | None => Self::parse_json(&content, &label),
            Some("yaml") | Some("yml") => Self::parse_yaml(&content, &label),
            Some(other) => Err(DocumentError::UnsupportedFormat(other.to_string()).into()),
        }
    }

    pub fn load_actor<P: AsRef<Path>>(&self, path: P) -> Result<Actor, PrereqError> {
        Ok(Actor::new(self.load_value(path)?))
    }

    /// Load an item that is about to be created on `parent`
    pub fn load_item<P: AsRef<Path>>(
        &self,
        path: P,
        parent: Arc<Actor>,
    ) -> Result<Item, PrereqError> {
        Ok(Item::embedded(self.load_value(path)?, parent))
    }

    pub fn parse_json(content: &str, label: &str) -> Result<Value, PrereqError> {
        let value: Value = serde_json::from_str(content)?;
        ensure_object(value, label)
    }

    pub fn parse_yaml(content: &str, label: &str) -> Result<Value, PrereqError> {
        let value: Value = serde_yaml::from_str(content)?;
        ensure_object(value, label)
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_object(value: Value, label: &str) -> Result<Value, PrereqError> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(DocumentError::NotAnObject(label.to_string()).into())
    }
}
