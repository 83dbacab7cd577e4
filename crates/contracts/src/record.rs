//! Record - one structured logging event

use chrono::{DateTime, Utc};

use crate::{Attr, Level};

/// Log record
///
/// `Clone` produces a fully independent copy, so a handler that receives a
/// record by value may mutate it freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Event time
    pub time: DateTime<Utc>,

    /// Severity
    pub level: Level,

    /// Log message
    pub message: String,

    attrs: Vec<Attr>,
}

impl Record {
    /// Create a record without attributes
    pub fn new(time: DateTime<Utc>, level: Level, message: impl Into<String>) -> Self {
        Self {
            time,
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    /// Create a record stamped with the current time
    pub fn now(level: Level, message: impl Into<String>) -> Self {
        Self::new(Utc::now(), level, message)
    }

    /// Builder-style single attribute append
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<crate::Value>) -> Self {
        self.attrs.push(Attr::new(key, value));
        self
    }

    /// Append attributes, skipping empty ones
    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs
            .extend(attrs.into_iter().filter(|attr| !attr.is_empty()));
    }

    /// Attributes in insertion order
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }
}
