//! CLI error types.

use grf_core::types::FieldError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `grf` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Field generation or spectrum estimation failed.
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// The job configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A command-line argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
