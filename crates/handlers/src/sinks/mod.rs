//! Leaf handler implementations
//!
//! Contains TextHandler, JsonHandler, and TracingHandler.

mod json;
mod text;
mod trace;

pub use self::json::JsonHandler;
pub use self::text::TextHandler;
pub use self::trace::{TracingHandler, TARGET};
