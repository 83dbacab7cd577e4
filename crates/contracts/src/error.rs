//! Layered error definitions
//!
//! Categorized by source: config / handler

use std::fmt;
use std::io;

use thiserror::Error;

/// Configuration and contract-level error
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error returned from [`LogHandler::handle`](crate::LogHandler::handle)
///
/// Comparable by value so callers can check whether a specific cause is
/// present with [`HandlerError::is`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Output write error
    #[error("handler '{handler}' write error: {message}")]
    Write { handler: String, message: String },

    /// Record could not be encoded
    #[error("handler '{handler}' encode error: {message}")]
    Encode { handler: String, message: String },

    /// IO error
    #[error("io error: {message}")]
    Io { kind: io::ErrorKind, message: String },

    /// Other error
    #[error("{0}")]
    Other(String),

    /// Several handlers failed during one dispatch
    #[error(transparent)]
    Joined(JoinedError),
}

impl From<io::Error> for HandlerError {
    fn from(e: io::Error) -> Self {
        Self::Io {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl HandlerError {
    /// Create write error
    pub fn write(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create encode error
    pub fn encode(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Combine errors, preserving order.
    ///
    /// - no errors: `None`
    /// - one error: that error, unchanged
    /// - several: [`HandlerError::Joined`], in input order
    ///
    /// A cause that is itself joined stays intact, so [`HandlerError::is`]
    /// still finds it as well as each of its own causes.
    pub fn join(errors: impl IntoIterator<Item = HandlerError>) -> Option<HandlerError> {
        let mut causes: Vec<HandlerError> = errors.into_iter().collect();
        match causes.len() {
            0 => None,
            1 => causes.pop(),
            _ => Some(HandlerError::Joined(JoinedError { causes })),
        }
    }

    /// Whether `target` is this error or one of its joined causes
    pub fn is(&self, target: &HandlerError) -> bool {
        match self {
            HandlerError::Joined(joined) => self == target || joined.contains(target),
            _ => self == target,
        }
    }

    /// Individual causes; a non-joined error yields itself
    pub fn causes(&self) -> impl Iterator<Item = &HandlerError> {
        match self {
            HandlerError::Joined(joined) => joined.causes.iter(),
            single => std::slice::from_ref(single).iter(),
        }
    }
}

/// Ordered collection of at least two handler errors
///
/// Only constructed through [`HandlerError::join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedError {
    causes: Vec<HandlerError>,
}

impl JoinedError {
    /// Causes in occurrence order
    pub fn causes(&self) -> &[HandlerError] {
        &self.causes
    }

    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }

    /// Whether `target` is among the causes
    pub fn contains(&self, target: &HandlerError) -> bool {
        self.causes.iter().any(|cause| cause.is(target))
    }

    pub fn into_causes(self) -> Vec<HandlerError> {
        self.causes
    }
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cause) in self.causes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for JoinedError {}
