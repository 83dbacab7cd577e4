//! TextHandler - logfmt lines: `time=… level=… msg=… key=value…`

use std::sync::Arc;

use chrono::SecondsFormat;
use contracts::{Attr, Context, HandlerError, Level, LogHandler, Record, SharedHandler};

use crate::format::{push_attr, push_token};
use crate::options::HandlerOptions;
use crate::writer::SharedWriter;

/// Handler that writes one logfmt line per record
#[derive(Clone)]
pub struct TextHandler {
    name: String,
    writer: SharedWriter,
    options: HandlerOptions,
    /// Dotted group path from `with_group`, e.g. `"req."`
    prefix: String,
    /// Attributes from `with_attrs`, already rendered
    preformatted: String,
}

impl TextHandler {
    /// Create a new TextHandler with the given name
    pub fn new(name: impl Into<String>, writer: SharedWriter, options: HandlerOptions) -> Self {
        Self {
            name: name.into(),
            writer,
            options,
            prefix: String::new(),
            preformatted: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, record: &Record) -> String {
        let mut line = String::with_capacity(64 + self.preformatted.len());
        line.push_str("time=");
        line.push_str(&record.time.to_rfc3339_opts(SecondsFormat::Millis, true));
        line.push_str(" level=");
        line.push_str(&record.level.to_string());
        line.push_str(" msg=");
        push_token(&mut line, &record.message);
        line.push_str(&self.preformatted);
        for attr in record.attrs() {
            push_attr(&mut line, &self.prefix, attr);
        }
        line.push('\n');
        line
    }
}

impl LogHandler for TextHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        self.options.allows(level)
    }

    fn handle(&self, _ctx: &Context, record: Record) -> Result<(), HandlerError> {
        let line = self.render(&record);
        self.writer
            .write_line(line.as_bytes())
            .map_err(|e| HandlerError::write(&self.name, e.to_string()))
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
