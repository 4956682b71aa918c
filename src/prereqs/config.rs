// SPDX-License-Identifier: MIT

//! Gate configuration
//!
//! Loaded from YAML with environment overrides:
//! - `THEIA_PREREQS_ENFORCE_FOR_GM` - `true`/`false`
//! - `THEIA_PREREQS_FLAG_SCOPE` - flag namespace (default `theia`)
//! - `THEIA_PREREQS_FLAG_KEY` - flag key (default `prereqs`)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, PrereqError};

pub const ENV_ENFORCE_FOR_GM: &str = "THEIA_PREREQS_ENFORCE_FOR_GM";
pub const ENV_FLAG_SCOPE: &str = "THEIA_PREREQS_FLAG_SCOPE";
pub const ENV_FLAG_KEY: &str = "THEIA_PREREQS_FLAG_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PrereqConfig {
    /// Apply prerequisites to GM users too
    pub enforce_for_gm: bool,
    /// Namespace under `flags` holding the rule array
    pub flag_scope: String,
    /// Key under the namespace holding the rule array
    pub flag_key: String,
}

impl Default for PrereqConfig {
    fn default() -> Self {
        Self {
            enforce_for_gm: true,
            flag_scope: "theia".to_string(),
            flag_key: "prereqs".to_string(),
        }
    }
}

impl PrereqConfig {
    /// Load a YAML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PrereqError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a YAML config; missing keys take their defaults
    pub fn parse_yaml(content: &str) -> Result<Self, PrereqError> {
        let config: PrereqConfig = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ENFORCE_FOR_GM) {
            self.enforce_for_gm = parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid_bool(ENV_ENFORCE_FOR_GM, raw.clone()))?;
        }
        if let Some(scope) = lookup(ENV_FLAG_SCOPE) {
            self.flag_scope = scope;
        }
        if let Some(key) = lookup(ENV_FLAG_KEY) {
            self.flag_key = key;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flag_scope.trim().is_empty() {
            return Err(ConfigError::EmptyFlagName("scope"));
        }
        if self.flag_key.trim().is_empty() {
            return Err(ConfigError::EmptyFlagName("key"));
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
