//! Composite - fan-out handler specialized by child count

use std::fmt;
use std::sync::{Arc, OnceLock};

use contracts::{Attr, Context, HandlerError, Level, LogHandler, Record, SharedHandler};
use tracing::debug;

use crate::composer::push_flat;

/// Handler that forwards to a flat list of leaf handlers.
///
/// Never holds another composite as a direct child. The single-child case is
/// never represented: [`compose`](crate::compose) returns the child itself.
/// Variants can be matched but only built through [`compose`](crate::compose):
///
/// ```compile_fail
/// use composer::{compose, Composite, SharedHandler};
///
/// let inner: SharedHandler = compose(Vec::<SharedHandler>::new());
/// let nested = Composite::Pair([inner.clone(), inner]);
/// ```
pub enum Composite {
    /// No children: disabled, handles nothing
    #[non_exhaustive]
    Empty,
    /// Exactly two children, in order
    #[non_exhaustive]
    Pair([SharedHandler; 2]),
    /// Three or more children, in order
    #[non_exhaustive]
    List(Box<[SharedHandler]>),
}

static EMPTY: OnceLock<SharedHandler> = OnceLock::new();

/// The one shared Empty instance
fn empty() -> SharedHandler {
    Arc::clone(EMPTY.get_or_init(|| Arc::new(Composite::Empty)))
}

impl Composite {
    /// Pick the representation for an already-flat child list.
    pub(crate) fn select(mut flat: Vec<SharedHandler>) -> SharedHandler {
        match flat.len() {
            0 => empty(),
            1 => flat.swap_remove(0),
            _ => match <[SharedHandler; 2]>::try_from(flat) {
                Ok(pair) => Arc::new(Composite::Pair(pair)),
                // shrinks to the exact length; no spare capacity is retained
                Err(list) => Arc::new(Composite::List(list.into_boxed_slice())),
            },
        }
    }

    /// Rebuild from decorated children, keeping the one-level invariant even
    /// if a child decorates into a composite of its own.
    fn rebuild(decorated: Vec<SharedHandler>) -> SharedHandler {
        let mut flat = Vec::with_capacity(decorated.len());
        for handler in decorated {
            push_flat(&mut flat, handler);
        }
        Self::select(flat)
    }

    pub fn children(&self) -> &[SharedHandler] {
        match self {
            Composite::Empty => &[],
            Composite::Pair(pair) => pair,
            Composite::List(list) => list,
        }
    }

    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Composite::Empty)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Composite::Empty => "empty",
            Composite::Pair(_) => "pair",
            Composite::List(_) => "list",
        }
    }
}

/// Hand one record to an enabled child, returning its error.
fn dispatch(
    index: usize,
    child: &SharedHandler,
    ctx: &Context,
    record: Record,
) -> Option<HandlerError> {
    match child.handle(ctx, record) {
        Ok(()) => None,
        Err(e) => {
            debug!(child = index, error = %e, "Child handler failed");
            Some(e)
        }
    }
}

fn finish(errors: impl IntoIterator<Item = HandlerError>) -> Result<(), HandlerError> {
    match HandlerError::join(errors) {
        None => Ok(()),
        Some(e) => Err(e),
    }
}

impl LogHandler for Composite {
    fn enabled(&self, ctx: &Context, level: Level) -> bool {
        match self {
            Composite::Empty => false,
            Composite::Pair([first, second]) => {
                first.enabled(ctx, level) || second.enabled(ctx, level)
            }
            Composite::List(list) => list.iter().any(|h| h.enabled(ctx, level)),
        }
    }

    fn handle(&self, ctx: &Context, record: Record) -> Result<(), HandlerError> {
        match self {
            Composite::Empty => Ok(()),
            Composite::Pair([first, second]) => {
                let level = record.level;
                let first_err = if first.enabled(ctx, level) {
                    dispatch(0, first, ctx, record.clone())
                } else {
                    None
                };
                let second_err = if second.enabled(ctx, level) {
                    dispatch(1, second, ctx, record)
                } else {
                    None
                };
                finish(first_err.into_iter().chain(second_err))
            }
            Composite::List(list) => {
                let Some((last, rest)) = list.split_last() else {
                    return Ok(());
                };
                let level = record.level;
                let mut errors = Vec::new();
                for (index, child) in rest.iter().enumerate() {
                    if child.enabled(ctx, level) {
                        errors.extend(dispatch(index, child, ctx, record.clone()));
                    }
                }
                if last.enabled(ctx, level) {
                    errors.extend(dispatch(rest.len(), last, ctx, record));
                }
                finish(errors)
            }
        }
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        match self {
            Composite::Empty => empty(),
            Composite::Pair([first, second]) => {
                Self::rebuild(vec![first.with_attrs(attrs.clone()), second.with_attrs(attrs)])
            }
            Composite::List(list) => {
                let Some((last, rest)) = list.split_last() else {
                    return empty();
                };
                let mut decorated: Vec<SharedHandler> = rest
                    .iter()
                    .map(|child| child.with_attrs(attrs.clone()))
                    .collect();
                decorated.push(last.with_attrs(attrs));
                Self::rebuild(decorated)
            }
        }
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        match self {
            Composite::Empty => empty(),
            _ => Self::rebuild(
                self.children()
                    .iter()
                    .map(|child| child.with_group(name))
                    .collect(),
            ),
        }
    }

    fn fan_out(&self) -> Option<&[SharedHandler]> {
        Some(self.children())
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("kind", &self.kind())
            .field("children", &self.len())
            .finish()
    }
}
