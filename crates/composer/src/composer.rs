//! compose() - flatten handlers and pick a composite representation

use std::fmt;

use contracts::{LogHandler, SharedHandler};
use tracing::trace;

use crate::composite::Composite;

/// Combine handlers into one that fans out to all of them.
///
/// `None` entries are skipped and nested composites are flattened, so the
/// result never has more than one level of composition. The returned handler
/// owns its own child list; later changes to the caller's collection have no
/// effect on it.
///
/// | non-empty leaves | result |
/// |---|---|
/// | 0 | [`Composite::Empty`] |
/// | 1 | the leaf itself |
/// | 2 | [`Composite::Pair`] |
/// | n | [`Composite::List`] |
///
/// # Example
/// ```ignore
/// let text: SharedHandler = Arc::new(TextHandler::new(...));
/// let json: SharedHandler = Arc::new(JsonHandler::new(...));
/// let both = composer::compose([text, json]);
/// ```
pub fn compose<I, H>(handlers: I) -> SharedHandler
where
    I: IntoIterator<Item = H>,
    H: Into<Option<SharedHandler>>,
{
    let mut flat = Vec::new();
    let mut inputs = 0usize;
    for handler in handlers {
        inputs += 1;
        if let Some(handler) = handler.into() {
            push_flat(&mut flat, handler);
        }
    }

    trace!(inputs, flattened = flat.len(), "Composed handlers");

    Composite::select(flat)
}

/// Append a handler, expanding composites into their (already flat) children.
pub(crate) fn push_flat(flat: &mut Vec<SharedHandler>, handler: SharedHandler) {
    match handler.fan_out() {
        Some(children) => flat.extend(children.iter().cloned()),
        None => flat.push(handler),
    }
}

/// Observable shape of a handler produced by [`compose`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Empty,
    /// A leaf handler, not a composite
    Single,
    Pair,
    List(usize),
}

impl Shape {
    pub fn of(handler: &dyn LogHandler) -> Self {
        match handler.fan_out().map(<[_]>::len) {
            None => Shape::Single,
            Some(0) => Shape::Empty,
            Some(2) => Shape::Pair,
            Some(n) => Shape::List(n),
        }
    }

    /// Shape [`compose`] produces for `n` leaf handlers
    pub fn for_leaves(n: usize) -> Self {
        match n {
            0 => Shape::Empty,
            1 => Shape::Single,
            2 => Shape::Pair,
            n => Shape::List(n),
        }
    }

    /// Number of leaf handlers
    pub fn leaves(self) -> usize {
        match self {
            Shape::Empty => 0,
            Shape::Single => 1,
            Shape::Pair => 2,
            Shape::List(n) => n,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Empty => f.write_str("empty"),
            Shape::Single => f.write_str("single"),
            Shape::Pair => f.write_str("pair"),
            Shape::List(n) => write!(f, "list({n})"),
        }
    }
}
