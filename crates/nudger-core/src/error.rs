//! Core error types for nudger-core.
//!
//! Each component owns a narrow error kind. Configuration errors are fatal
//! and surface before the reminder loop starts; dialog and cycle errors are
//! absorbed by the scheduler and only reach the log.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for nudger-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration source does not exist.
    #[error("Config file {} not found", path.display())]
    NotFound { path: PathBuf },

    /// The source exists but could not be parsed.
    #[error("Invalid configuration in {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    /// The source parsed, but a required field is missing or out of domain.
    #[error("Incomplete configuration, '{key}': {message}")]
    Incomplete { key: String, message: String },
}

impl ConfigError {
    pub(crate) fn incomplete(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Incomplete {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::NotFound { .. } => "not_found",
            ConfigError::Malformed { .. } => "malformed",
            ConfigError::Incomplete { .. } => "incomplete",
        }
    }
}

/// Errors raised by a [`DialogGateway`](crate::dialog::DialogGateway).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The dialog could not be shown or returned an unusable value.
    #[error("Dialog failed: {0}")]
    Failed(String),

    /// The dialog backend is gone (e.g. input stream closed).
    #[error("Dialog backend unavailable: {0}")]
    Unavailable(String),

    /// The wait was aborted because shutdown was requested.
    #[error("Dialog wait cancelled")]
    Cancelled,
}

/// Errors that can end a single reminder cycle early.
///
/// None of these stop the loop; the scheduler logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error("Cannot pick from empty pool '{0}'")]
    EmptyPool(&'static str),
}

/// Shutdown was requested while the loop was suspended.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Cancelled by shutdown request")]
pub struct Cancelled;

impl From<Cancelled> for DialogError {
    fn from(_: Cancelled) -> Self {
        DialogError::Cancelled
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_kinds_are_distinct() {
        let not_found = ConfigError::NotFound {
            path: PathBuf::from("config.json"),
        };
        let malformed = ConfigError::Malformed {
            path: PathBuf::from("config.json"),
            message: "expected value".into(),
        };
        let incomplete = ConfigError::incomplete("questions", "must not be empty");

        assert_eq!(not_found.kind(), "not_found");
        assert_eq!(malformed.kind(), "malformed");
        assert_eq!(incomplete.kind(), "incomplete");
    }

    #[test]
    fn not_found_message_names_the_path() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(err.to_string(), "Config file missing.json not found");
    }

    #[test]
    fn config_error_converts_into_core_error() {
        let err: CoreError = ConfigError::incomplete("settings", "missing").into();
        assert!(matches!(err, CoreError::Config(ConfigError::Incomplete { .. })));
    }

    #[test]
    fn json_error_converts_with_question_mark() {
        fn parse(text: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(text)?)
        }

        let err = parse("{").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
