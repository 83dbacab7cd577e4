//! TracingHandler - forwards records as `tracing` events

use std::sync::Arc;

use contracts::{Attr, Context, HandlerError, Level, LogHandler, Record, SharedHandler};
use tracing::{debug, enabled, error, info, trace, warn};

use crate::format::push_attr;
use crate::options::HandlerOptions;

/// Event target used for forwarded records
pub const TARGET: &str = "fanlog";

/// Handler that re-emits records through the active `tracing` subscriber.
///
/// Attributes are rendered as one logfmt `attrs` field.
#[derive(Clone)]
pub struct TracingHandler {
    name: String,
    options: HandlerOptions,
    prefix: String,
    preformatted: String,
}

impl TracingHandler {
    /// Create a new TracingHandler with the given name
    pub fn new(name: impl Into<String>, options: HandlerOptions) -> Self {
        Self {
            name: name.into(),
            options,
            prefix: String::new(),
            preformatted: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn render_attrs(&self, record: &Record) -> String {
        let mut attrs = self.preformatted.clone();
        for attr in record.attrs() {
            push_attr(&mut attrs, &self.prefix, attr);
        }
        attrs.trim_start().to_string()
    }
}

/// Map a record level onto the nearest `tracing` level
fn tracing_level(level: Level) -> tracing::Level {
    if level >= Level::ERROR {
        tracing::Level::ERROR
    } else if level >= Level::WARN {
        tracing::Level::WARN
    } else if level >= Level::INFO {
        tracing::Level::INFO
    } else if level >= Level::DEBUG {
        tracing::Level::DEBUG
    } else {
        tracing::Level::TRACE
    }
}

impl LogHandler for TracingHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        if !self.options.allows(level) {
            return false;
        }
        let level = tracing_level(level);
        if level == tracing::Level::ERROR {
            enabled!(target: TARGET, tracing::Level::ERROR)
        } else if level == tracing::Level::WARN {
            enabled!(target: TARGET, tracing::Level::WARN)
        } else if level == tracing::Level::INFO {
            enabled!(target: TARGET, tracing::Level::INFO)
        } else if level == tracing::Level::DEBUG {
            enabled!(target: TARGET, tracing::Level::DEBUG)
        } else {
            enabled!(target: TARGET, tracing::Level::TRACE)
        }
    }

    fn handle(&self, _ctx: &Context, record: Record) -> Result<(), HandlerError> {
        let attrs = self.render_attrs(&record);
        let handler = self.name.as_str();
        let message = record.message.as_str();

        let record_level = record.level;
        let level = tracing_level(record_level);

        if level == tracing::Level::ERROR {
            error!(target: TARGET, handler, %record_level, %attrs, "{message}");
        } else if level == tracing::Level::WARN {
            warn!(target: TARGET, handler, %record_level, %attrs, "{message}");
        } else if level == tracing::Level::INFO {
            info!(target: TARGET, handler, %record_level, %attrs, "{message}");
        } else if level == tracing::Level::DEBUG {
            debug!(target: TARGET, handler, %record_level, %attrs, "{message}");
        } else {
            trace!(target: TARGET, handler, %record_level, %attrs, "{message}");
        }
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        let mut next = self.clone();
        for attr in &attrs {
            push_attr(&mut next.preformatted, &self.prefix, attr);
        }
        Arc::new(next)
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        let mut next = self.clone();
        if !name.is_empty() {
            next.prefix.push_str(name);
            next.prefix.push('.');
        }
        Arc::new(next)
    }
}
