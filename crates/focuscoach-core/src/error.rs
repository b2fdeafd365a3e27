//! Core error types for focuscoach-core.
//!
//! The risk engine itself never fails: bad input only suppresses the signals
//! that depend on it. Errors arise at the edges of the library, where
//! configuration and session state are read from or written to disk.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focuscoach-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// No snapshot recorded for the requested task
    #[error("No task snapshot recorded with id '{0}'")]
    UnknownTask(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_core_error() {
        let err: CoreError = ConfigError::InvalidValue {
            key: "history.behavior_capacity".to_string(),
            message: "must be at least 1".to_string(),
        }
        .into();
        assert!(err.to_string().contains("history.behavior_capacity"));
    }

    #[test]
    fn unknown_task_message_names_the_id() {
        let err = ValidationError::UnknownTask("task-42".to_string());
        assert_eq!(err.to_string(), "No task snapshot recorded with id 'task-42'");
    }
}
