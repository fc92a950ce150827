//! Leveled logger with daily log file rotation
//!
//! A [`Logger`] drops lines below its minimum [`Level`], renders the rest as
//! `[prefix][date time ][file:line: ]LEVEL message` and writes each line in one
//! piece, either to any writer or to a file that is archived as
//! `<path>.<YYYYMMDD>` when the day changes.
//!
//! Free functions and the `*f!` macros log through a process-wide default
//! logger that can be replaced at any time.
//!
//! ```no_run
//! use proven_logger::{Flags, Level, Logger, infof, set_default_logger};
//!
//! let logger = Logger::rotating("/var/log/app.log", "", Flags::DEFAULT, Level::Info)?;
//! logger.infof(format_args!("listening on {}", 8080));
//!
//! set_default_logger(logger);
//! infof!("through the default logger");
//! proven_logger::warn(&[&"disk at ", &91, &"%"]);
//! # Ok::<(), proven_logger::Error>(())
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod flags;
mod format;
mod global;
mod level;
mod logger;
mod macros;
mod record;

pub mod compat;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ENV_FILE, ENV_FLAGS, ENV_LEVEL, ENV_PREFIX, LoggerConfig, LoggerConfigBuilder};
pub use error::{Error, Result};
pub use flags::Flags;
pub use format::{LineFormat, Message};
pub use global::{
    debug, debugf, debugln, default_logger, error, errorf, errorln, fatal, fatalf, fatalln, info,
    infof, infoln, panic, panicf, panicln, print, printf, println, set_default_logger, warn,
    warnf, warnln,
};
pub use level::Level;
pub use logger::{FATAL_EXIT_CODE, FailureHandler, Logger, exit_on_failure};
pub use record::Record;

pub use proven_logger_file::{Clock, RotatingFile, SystemClock, archive_path, day_suffix};
