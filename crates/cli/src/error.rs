//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Malformed `--attr` argument
    #[error("Invalid attribute '{input}': {reason}")]
    InvalidAttr { input: String, reason: String },

    /// One or more handlers failed to write the record
    #[error("{count} handler(s) failed")]
    HandlersFailed { count: usize },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn invalid_attr(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttr {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn handlers_failed(count: usize) -> Self {
        Self::HandlersFailed { count }
    }
}
