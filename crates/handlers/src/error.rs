//! Handler construction errors

use thiserror::Error;

/// Errors raised while building handlers from a blueprint
#[derive(Debug, Error)]
pub enum BuildError {
    /// Handler creation error
    #[error("failed to create handler '{name}': {message}")]
    HandlerCreation { name: String, message: String },
}

impl BuildError {
    /// Create a handler creation error
    pub fn handler_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
