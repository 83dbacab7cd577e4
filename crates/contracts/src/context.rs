//! Context - request-scoped values passed through to handlers
//!
//! Immutable and cheap to clone: each `with_value` links a new node in front of
//! the shared parent chain.

use std::sync::Arc;

use crate::Value;

#[derive(Debug)]
struct Node {
    key: String,
    value: Value,
    parent: Option<Arc<Node>>,
}

/// Call context handed to [`LogHandler::enabled`](crate::LogHandler::enabled)
/// and [`LogHandler::handle`](crate::LogHandler::handle).
///
/// # Examples
/// ```
/// use contracts::{Context, Value};
///
/// let ctx = Context::background().with_value("request_id", "abc");
/// assert_eq!(ctx.value("request_id"), Some(&Value::from("abc")));
/// assert!(Context::background().value("request_id").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// Empty root context
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a child context carrying one more value; shadows an equal key.
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: key.into(),
                value: value.into(),
                parent: self.head.clone(),
            })),
        }
    }

    /// Most recently set value for `key`
    pub fn value(&self, key: &str) -> Option<&Value> {
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            if n.key == key {
                return Some(&n.value);
            }
            node = n.parent.as_deref();
        }
        None
    }
}
