//! Level - record severity
//!
//! Signed integer severity. Larger values are more severe; the gaps between the
//! named levels leave room for custom levels such as `INFO+2`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ContractError;

/// Severity of a log record.
///
/// # Examples
/// ```
/// use contracts::Level;
///
/// assert!(Level::ERROR > Level::INFO);
/// assert_eq!(Level::INFO.to_string(), "INFO");
/// assert_eq!(Level::new(2).to_string(), "INFO+2");
/// assert_eq!("warn".parse::<Level>().unwrap(), Level::WARN);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    /// Create a level from its raw value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw severity value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Nearest named level at or below this one, and the offset from it.
    fn base(self) -> (&'static str, i32) {
        if self.0 < Self::INFO.0 {
            ("DEBUG", self.0 - Self::DEBUG.0)
        } else if self.0 < Self::WARN.0 {
            ("INFO", self.0 - Self::INFO.0)
        } else if self.0 < Self::ERROR.0 {
            ("WARN", self.0 - Self::WARN.0)
        } else {
            ("ERROR", self.0 - Self::ERROR.0)
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, offset) = self.base();
        match offset {
            0 => f.write_str(name),
            n => write!(f, "{name}{n:+}"),
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level({self})")
    }
}

impl FromStr for Level {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, offset) = match s.find(['+', '-']) {
            Some(idx) => {
                let offset = s[idx..]
                    .parse::<i32>()
                    .map_err(|e| ContractError::Other(format!("invalid level '{s}': {e}")))?;
                (&s[..idx], offset)
            }
            None => (s, 0),
        };

        let base = match name.to_ascii_lowercase().as_str() {
            "debug" => Self::DEBUG,
            "info" => Self::INFO,
            "warn" | "warning" => Self::WARN,
            "error" => Self::ERROR,
            _ => return Err(ContractError::Other(format!("unknown level '{s}'"))),
        };

        base.0
            .checked_add(offset)
            .map(Self)
            .ok_or_else(|| ContractError::Other(format!("level '{s}' is out of range")))
    }
}

impl From<i32> for Level {
    #[inline]
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
