//! Error types for the sweep script generator.

use std::path::PathBuf;
use thiserror::Error;

/// Status file errors
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Status file is empty (missing `idx,status,command` header)")]
    MissingHeader,

    #[error("Unexpected status file header: {0}")]
    BadHeader(String),

    #[error("Malformed status row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Unknown status '{0}'")]
    UnknownStatus(String),
}

/// Errors surfaced by plan building, script emission, and the CLI.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to write script {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Status file error: {0}")]
    StatusError(#[from] StatusError),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for SweepError {
    fn from(err: config::ConfigError) -> Self {
        SweepError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for SweepError {
    fn from(err: serde_json::Error) -> Self {
        SweepError::SerializationFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SweepError {
    fn from(err: toml::ser::Error) -> Self {
        SweepError::SerializationFailed(err.to_string())
    }
}
