//! A single log line before formatting

use crate::Level;

use std::borrow::Cow;
use std::panic::Location;

use chrono::{DateTime, Local};

/// Everything needed to render one line
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Log level
    pub level: Level,
    /// The rendered message, without the level tag
    pub message: Cow<'a, str>,
    /// When the line was produced
    pub timestamp: DateTime<Local>,
    /// Source file of the call site
    pub file: Option<&'a str>,
    /// Source line of the call site
    pub line: Option<u32>,
}

impl<'a> Record<'a> {
    /// Create a record stamped with the current time and no location
    #[inline]
    pub fn new(level: Level, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
            file: None,
            line: None,
        }
    }

    /// Builder-style method for setting location
    #[inline]
    #[must_use]
    pub fn with_location(mut self, file: &'a str, line: u32) -> Self {
        self.file = Some(file);
        self.line = Some(line);
        self
    }

    /// Take the location from a `#[track_caller]` frame
    #[inline]
    #[must_use]
    pub fn with_caller(self, caller: &'static Location<'static>) -> Self {
        self.with_location(caller.file(), caller.line())
    }

    /// Builder-style method for setting the timestamp
    #[inline]
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
