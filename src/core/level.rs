//! Log level definitions

use super::error::LoggerError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Severity descriptor attached to every record
///
/// Levels are compared by `value` alone. The glyph and color hint are
/// presentation details for console sinks and are never serialized.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Level {
    pub value: u8,
    pub name: &'static str,
    #[serde(skip)]
    pub glyph: &'static str,
    #[serde(skip)]
    pub color: &'static str,
}

impl Level {
    pub const DEBUG: Level = Level::new(10, "DEBUG", "◆", "blue");
    pub const INFO: Level = Level::new(20, "INFO", "●", "green");
    pub const WARN: Level = Level::new(30, "WARN", "▲", "yellow");
    pub const ERROR: Level = Level::new(40, "ERROR", "✖", "red");
    pub const PANIC: Level = Level::new(50, "PANIC", "☠", "magenta");

    /// All predefined levels in ascending order
    pub const ALL: [Level; 5] = [
        Level::DEBUG,
        Level::INFO,
        Level::WARN,
        Level::ERROR,
        Level::PANIC,
    ];

    pub const fn new(
        value: u8,
        name: &'static str,
        glyph: &'static str,
        color: &'static str,
    ) -> Self {
        Self {
            value,
            name,
            glyph,
            color,
        }
    }

    pub fn to_str(&self) -> &'static str {
        self.name
    }

    /// Four-character tag used in aligned console output (`DEBU`, `INFO`, `WARN`, ...)
    pub fn tag(&self) -> &'static str {
        match self.name.char_indices().nth(4) {
            Some((idx, _)) => &self.name[..idx],
            None => self.name,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Level::DEBUG),
            "INFO" => Ok(Level::INFO),
            "WARN" | "WARNING" => Ok(Level::WARN),
            "ERROR" => Ok(Level::ERROR),
            "PANIC" | "FATAL" => Ok(Level::PANIC),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}
