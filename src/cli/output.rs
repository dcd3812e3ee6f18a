//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::SweepError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &SweepError) -> String {
    match e {
        SweepError::ConfigError(msg) => format!("Error: {}", msg),
        SweepError::StatusError(inner) => format!("Error: invalid status file: {}", inner),
        other => format!("Error: {}", other),
    }
}
