//! Options common to the built-in handlers

use contracts::Level;

/// Handler options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Minimum enabled level (default INFO)
    pub level: Level,
}

impl HandlerOptions {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    #[inline]
    pub(crate) fn allows(&self, level: Level) -> bool {
        level >= self.level
    }
}
