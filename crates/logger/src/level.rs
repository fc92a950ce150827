//! Severity levels

use crate::error::Error;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical tag of each level, indexed by [`Level`] ordinal
const LEVEL_TAGS: [&str; 6] = ["DEBUG", "INFO", "WARN", "ERROR", "PANIC", "FATAL"];

/// Severity of a log line.
///
/// Levels are totally ordered from `Debug` (lowest) to `Fatal` (highest). A
/// logger emits a line when its level is at or above the configured minimum.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Diagnostic detail
    #[default]
    Debug = 0,
    /// Normal operation
    Info = 1,
    /// Something unexpected that the process recovers from
    Warn = 2,
    /// A failed operation
    Error = 3,
    /// Logged, then the calling thread panics with the message
    Panic = 4,
    /// Logged, then the process exits with a non-zero status
    Fatal = 5,
}

impl Level {
    /// All levels, lowest first
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Panic,
        Self::Fatal,
    ];

    /// The canonical upper-case tag written in front of every message
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        LEVEL_TAGS[self as usize]
    }

    /// Whether a line at this level passes a logger configured with `min`.
    #[inline(always)]
    #[must_use]
    pub fn is_enabled(self, min: Self) -> bool {
        self >= min
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Parse a level name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidLevel(s.to_string()))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str().to_ascii_lowercase())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
