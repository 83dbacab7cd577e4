//! JsonHandler - one JSON object per line
//!
//! Key order is `time`, `level`, `msg`, then attributes. Groups become nested
//! objects; a group that ends up with no attributes is omitted. Keys are never
//! merged away: an attribute that reuses a key already on the line (including
//! `time`, `level` and `msg`) is written as a second member with that key.

use std::sync::Arc;

use chrono::SecondsFormat;
use contracts::{Attr, Context, HandlerError, Level, LogHandler, Record, SharedHandler, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value as JsonValue};

use crate::options::HandlerOptions;
use crate::writer::SharedWriter;

/// One `with_group` / `with_attrs` decoration
#[derive(Debug)]
enum Segment {
    Group(String),
    Attrs(Vec<Attr>),
}

/// Object members in insertion order; duplicate keys are kept
#[derive(Debug, Default)]
struct Members(Vec<(String, Member)>);

#[derive(Debug)]
enum Member {
    Scalar(JsonValue),
    Group(Members),
}

impl Members {
    fn push(&mut self, key: impl Into<String>, value: JsonValue) {
        self.0.push((key.into(), Member::Scalar(value)));
    }

    /// The latest group named `key`, created at the end if there is none
    fn group(&mut self, key: &str) -> &mut Members {
        let index = match self
            .0
            .iter()
            .rposition(|(k, m)| k == key && matches!(m, Member::Group(_)))
        {
            Some(index) => index,
            None => {
                self.0.push((key.to_string(), Member::Group(Members::default())));
                self.0.len() - 1
            }
        };
        match &mut self.0[index].1 {
            Member::Group(members) => members,
            Member::Scalar(_) => unreachable!("index points at a group"),
        }
    }
}

impl Serialize for Members {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, member) in &self.0 {
            match member {
                Member::Scalar(value) => map.serialize_entry(key, value)?,
                Member::Group(members) => map.serialize_entry(key, members)?,
            }
        }
        map.end()
    }
}

/// Handler that writes newline-delimited JSON
#[derive(Clone)]
pub struct JsonHandler {
    name: String,
    writer: SharedWriter,
    options: HandlerOptions,
    /// Decorations in call order; shared with the handler this was derived from
    segments: Vec<Arc<Segment>>,
}

impl JsonHandler {
    /// Create a new JsonHandler with the given name
    pub fn new(name: impl Into<String>, writer: SharedWriter, options: HandlerOptions) -> Self {
        Self {
            name: name.into(),
            writer,
            options,
            segments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn derive(&self, segment: Segment) -> SharedHandler {
        let mut next = self.clone();
        next.segments.push(Arc::new(segment));
        Arc::new(next)
    }

    fn to_members(&self, record: &Record) -> Members {
        let mut root = Members::default();
        root.push(
            "time",
            JsonValue::String(record.time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
        root.push("level", JsonValue::String(record.level.to_string()));
        root.push("msg", JsonValue::String(record.message.clone()));

        let mut path: Vec<&str> = Vec::new();
        for segment in &self.segments {
            match segment.as_ref() {
                Segment::Group(name) => path.push(name),
                Segment::Attrs(attrs) => insert_attrs(&mut root, &path, attrs),
            }
        }
        insert_attrs(&mut root, &path, record.attrs());
        root
    }
}

fn has_content(attrs: &[Attr]) -> bool {
    attrs.iter().any(|attr| match &attr.value {
        Value::Group(members) => has_content(members),
        _ => !attr.is_empty(),
    })
}

/// Insert `attrs` under the nested group `path`, creating groups lazily.
fn insert_attrs(root: &mut Members, path: &[&str], attrs: &[Attr]) {
    if !has_content(attrs) {
        return;
    }
    let mut target = root;
    for key in path {
        target = target.group(key);
    }
    for attr in attrs {
        insert_attr(target, attr);
    }
}

fn insert_attr(target: &mut Members, attr: &Attr) {
    if attr.is_empty() {
        return;
    }
    let value = match &attr.value {
        Value::Group(members) => {
            if has_content(members) {
                let target = if attr.key.is_empty() {
                    target
                } else {
                    target.group(&attr.key)
                };
                for member in members {
                    insert_attr(target, member);
                }
            }
            return;
        }
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Int(v) => JsonValue::from(*v),
        Value::Uint(v) => JsonValue::from(*v),
        Value::Float(v) => Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(v.to_string())),
        Value::Bool(v) => JsonValue::Bool(*v),
        Value::Duration(d) => JsonValue::from(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
        Value::Time(t) => JsonValue::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    };
    target.push(attr.key.clone(), value);
}

impl LogHandler for JsonHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        self.options.allows(level)
    }

    fn handle(&self, _ctx: &Context, record: Record) -> Result<(), HandlerError> {
        let members = self.to_members(&record);
        let mut line = serde_json::to_vec(&members)
            .map_err(|e| HandlerError::encode(&self.name, e.to_string()))?;
        line.push(b'\n');
        self.writer
            .write_line(&line)
            .map_err(|e| HandlerError::write(&self.name, e.to_string()))
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        if attrs.is_empty() {
            return Arc::new(self.clone());
        }
        self.derive(Segment::Attrs(attrs))
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        if name.is_empty() {
            return Arc::new(self.clone());
        }
        self.derive(Segment::Group(name.to_string()))
    }
}
