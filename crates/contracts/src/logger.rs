//! Logger - thin front-end that builds records and hands them to a handler

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::{Attr, Context, HandlerError, Level, LogHandler, Record, SharedHandler};

/// Logging front-end over a single [`LogHandler`].
///
/// Cloning is cheap; clones share the handler.
#[derive(Clone)]
pub struct Logger {
    handler: SharedHandler,
}

impl Logger {
    pub fn new(handler: SharedHandler) -> Self {
        Self { handler }
    }

    /// Wrap a concrete handler
    pub fn from_handler<H: LogHandler + 'static>(handler: H) -> Self {
        Self::new(Arc::new(handler))
    }

    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }

    /// Logger whose records all carry `attrs`
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Self::new(self.handler.with_attrs(attrs))
    }

    /// Logger that qualifies subsequent attributes with `name`
    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        Self::new(self.handler.with_group(name))
    }

    pub fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.handler.enabled(ctx, level)
    }

    /// Build a record and dispatch it if the handler is enabled for `level`.
    ///
    /// # Errors
    /// Whatever the handler reports
    pub fn log(
        &self,
        ctx: &Context,
        level: Level,
        message: &str,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> Result<(), HandlerError> {
        if !self.handler.enabled(ctx, level) {
            return Ok(());
        }
        let mut record = Record::new(Utc::now(), level, message);
        record.add_attrs(attrs);
        self.handler.handle(ctx, record)
    }

    pub fn debug(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log_reported(Level::DEBUG, message, attrs);
    }

    pub fn info(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log_reported(Level::INFO, message, attrs);
    }

    pub fn warn(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log_reported(Level::WARN, message, attrs);
    }

    pub fn error(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log_reported(Level::ERROR, message, attrs);
    }

    fn log_reported(&self, level: Level, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        if let Err(e) = self.log(&Context::background(), level, message, attrs) {
            warn!(level = %level, error = %e, "Log handler failed");
        }
    }
}
