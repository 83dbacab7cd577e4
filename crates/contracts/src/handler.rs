//! LogHandler trait - the capability every leaf and composite implements
//!
//! Defines the abstract interface between the logger front-end and handlers.

use std::sync::Arc;

use crate::{Attr, Context, HandlerError, Level, Record};

/// Shared, thread-safe handler reference
pub type SharedHandler = Arc<dyn LogHandler>;

/// Structured log handler
///
/// Implementations must be safe for concurrent use once constructed.
/// `with_attrs` and `with_group` never mutate `self`; they return a new
/// handler that carries the extra context.
pub trait LogHandler: Send + Sync {
    /// Whether the handler would act on a record at `level`.
    ///
    /// Callers use this as a cheap pre-filter before building records.
    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    /// Consume one record.
    ///
    /// The record is owned by the handler for the duration of the call.
    ///
    /// # Errors
    /// Returns the handler's failure, naming the handler where possible
    fn handle(&self, ctx: &Context, record: Record) -> Result<(), HandlerError>;

    /// Handler whose output includes `attrs` on every subsequent record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler;

    /// Handler that qualifies all subsequent attributes with group `name`.
    fn with_group(&self, name: &str) -> SharedHandler;

    /// Flat child list of a fan-out handler.
    ///
    /// Leaf handlers keep the default. Only composites built by the composer
    /// return `Some`, which lets nested compositions collapse to one level.
    #[doc(hidden)]
    fn fan_out(&self) -> Option<&[SharedHandler]> {
        None
    }
}
