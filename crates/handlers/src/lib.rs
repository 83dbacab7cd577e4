//! # Handlers
//!
//! 内置 handler 与构建工厂。
//!
//! 负责：
//! - `TextHandler` / `JsonHandler` / `TracingHandler` 三种叶子 handler
//! - 共享输出（stdout、stderr、文件、内存缓冲）
//! - 根据 `LoggingBlueprint` 创建并组合 handler

pub mod error;
pub mod factory;
mod format;
pub mod options;
pub mod sinks;
pub mod writer;

pub use error::BuildError;
pub use factory::{build, build_logger, create_handler};
pub use options::HandlerOptions;
pub use sinks::{JsonHandler, TextHandler, TracingHandler};
pub use writer::{SharedBuffer, SharedWriter};
