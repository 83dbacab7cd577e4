//! logfmt rendering shared by the text and tracing handlers

use chrono::SecondsFormat;
use contracts::{Attr, Value};
use std::fmt::Write;

/// Whether a key or value must be quoted to stay one logfmt token
pub(crate) fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}

/// Append `s`, quoted with Rust string escaping when needed
pub(crate) fn push_token(buf: &mut String, s: &str) {
    if needs_quoting(s) {
        let _ = write!(buf, "{s:?}");
    } else {
        buf.push_str(s);
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Time(t) => t.to_rfc3339_opts(SecondsFormat::Millis, true),
        other => other.to_string(),
    }
}

/// Append ` key=value` for one attribute.
///
/// `prefix` is the dotted group path (`"req."`) in effect. Group values
/// extend the prefix with their key; an empty-key group is inlined.
pub(crate) fn push_attr(buf: &mut String, prefix: &str, attr: &Attr) {
    if attr.is_empty() {
        return;
    }
    match &attr.value {
        Value::Group(members) => {
            if members.is_empty() {
                return;
            }
            let nested;
            let prefix = if attr.key.is_empty() {
                prefix
            } else {
                nested = format!("{prefix}{}.", attr.key);
                &nested
            };
            for member in members {
                push_attr(buf, prefix, member);
            }
        }
        value => {
            buf.push(' ');
            push_token(buf, &format!("{prefix}{}", attr.key));
            buf.push('=');
            push_token(buf, &value_text(value));
        }
    }
}
