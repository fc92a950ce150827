//! Logger configuration

use crate::error::Result;
use crate::{Flags, Level, Logger};

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable holding the minimum level
pub const ENV_LEVEL: &str = "LOG_LEVEL";
/// Environment variable holding the line prefix
pub const ENV_PREFIX: &str = "LOG_PREFIX";
/// Environment variable holding a comma separated flag list
pub const ENV_FLAGS: &str = "LOG_FLAGS";
/// Environment variable holding the path of a daily rotated log file
pub const ENV_FILE: &str = "LOG_FILE";

/// Settings for building a [`Logger`].
///
/// Deserializes from a service config section, for example in TOML:
///
/// ```toml
/// level = "warn"
/// prefix = "[api] "
/// flags = ["date", "time", "microseconds", "shortfile"]
/// file = "/var/log/api.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level that gets written
    pub level: Level,
    /// Text in front of every line
    pub prefix: String,
    /// Line header flags
    pub flags: Flags,
    /// Daily rotated log file; stderr when unset
    pub file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            prefix: String::new(),
            flags: Flags::DEFAULT,
            file: None,
        }
    }
}

impl LoggerConfig {
    /// Start building a configuration from the defaults
    #[must_use]
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::default()
    }

    /// Read the configuration from `LOG_LEVEL`, `LOG_PREFIX`, `LOG_FLAGS` and
    /// `LOG_FILE`. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`](crate::Error::InvalidLevel) or
    /// [`Error::InvalidFlag`](crate::Error::InvalidFlag) for malformed values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`LoggerConfig::from_env`] with a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`](crate::Error::InvalidLevel) or
    /// [`Error::InvalidFlag`](crate::Error::InvalidFlag) for malformed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level.parse()?;
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            config.prefix = prefix;
        }
        if let Some(flags) = lookup(ENV_FLAGS) {
            let mut parsed = Flags::NONE;
            for name in flags.split(',').filter(|name| !name.trim().is_empty()) {
                parsed |= name.parse::<Flags>()?;
            }
            config.flags = parsed;
        }
        if let Some(file) = lookup(ENV_FILE).filter(|file| !file.is_empty()) {
            config.file = Some(PathBuf::from(file));
        }

        Ok(config)
    }

    /// Build the logger: daily rotated when [`LoggerConfig::file`] is set,
    /// stderr otherwise.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`Error::File`](crate::Error::File) if the log file
    /// cannot be opened.
    pub fn build(&self) -> Result<Logger> {
        match &self.file {
            Some(path) => Logger::rotating(path, self.prefix.clone(), self.flags, self.level),
            None => Ok(Logger::new(
                io::stderr(),
                self.prefix.clone(),
                self.flags,
                self.level,
            )),
        }
    }
}

/// Builder for [`LoggerConfig`]
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// Set the minimum level
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    /// Set the line prefix
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Set the header flags
    #[must_use]
    pub const fn flags(mut self, flags: Flags) -> Self {
        self.config.flags = flags;
        self
    }

    /// Write to a daily rotated file at `path`
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file = Some(path.into());
        self
    }

    /// Finish the configuration
    #[must_use]
    pub fn build(self) -> LoggerConfig {
        self.config
    }
}
