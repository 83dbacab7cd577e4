//! # Composer
//!
//! Handler 组合模块。
//!
//! 负责：
//! - 将多个 `LogHandler` 组合成一个
//! - 展平嵌套组合，始终只有一层
//! - Fan-out `enabled` / `handle` / `with_attrs` / `with_group` 到所有子 handler
//! - 聚合子 handler 的错误，保留各自身份

pub mod composer;
pub mod composite;

#[cfg(test)]
mod test_support;

pub use composer::{compose, Shape};
pub use composite::Composite;
pub use contracts::{LogHandler, SharedHandler};
