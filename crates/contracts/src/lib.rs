//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: the
//! [`LogHandler`] capability, the record model it consumes, and the
//! configuration blueprint.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Ownership Model
//! - `handle` takes a [`Record`] by value; the receiver owns it
//! - `with_attrs` takes a `Vec<Attr>` by value; the receiver owns it
//! - Sharing between handlers therefore always goes through `Clone`

mod attr;
mod blueprint;
mod context;
mod error;
mod handler;
mod level;
mod logger;
mod record;

pub use attr::{Attr, Value};
pub use blueprint::*;
pub use context::Context;
pub use error::*;
pub use handler::{LogHandler, SharedHandler};
pub use level::Level;
pub use logger::Logger;
pub use record::Record;
