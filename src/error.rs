// SPDX-License-Identifier: MIT

//! Typed error handling for theia-prereqs
//!
//! Rule evaluation itself never fails: malformed rules and missing actor data
//! are reported as failed prerequisites. These errors cover the fallible
//! edges around it (configuration, document loading).

use thiserror::Error;

/// Top-level error type for theia-prereqs
#[derive(Debug, Error)]
pub enum PrereqError {
    /// Configuration errors (invalid file, bad env override)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document loading errors
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment override could not be interpreted
    #[error("Invalid value '{value}' for {var}: expected true or false")]
    InvalidBool { var: String, value: String },

    /// Flag scope or key is empty
    #[error("Flag {0} must not be empty")]
    EmptyFlagName(&'static str),
}

/// Errors raised while reading exported host documents
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Top level of the document is not an object
    #[error("Document '{0}' is not a JSON object")]
    NotAnObject(String),

    /// File extension is neither JSON nor YAML
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// Create an invalid boolean override error
    pub fn invalid_bool(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidBool {
            var: var.into(),
            value: value.into(),
        }
    }
}
