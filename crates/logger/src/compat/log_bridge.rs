//! Bridge from the `log` crate to proven-logger

use crate::{Level, Logger, Record, default_logger};
use log::{LevelFilter, Log, Metadata, Record as LogRecord};
use std::sync::Arc;

/// Wrapper to implement the log crate's Log trait
pub struct LogBridge {
    /// `None` follows whatever the default logger is at the time of the call
    logger: Option<Arc<Logger>>,
}

impl LogBridge {
    /// Forward to `logger`
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    /// Forward to the process-wide default logger, including later
    /// replacements of it
    #[must_use]
    pub const fn to_default() -> Self {
        Self { logger: None }
    }

    fn logger(&self) -> Arc<Logger> {
        match &self.logger {
            Some(logger) => logger.clone(),
            None => default_logger(),
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger().is_enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &LogRecord) {
        let logger = self.logger();
        let level = map_level(record.level());
        if !logger.is_enabled(level) {
            return;
        }

        let mut ours = Record::new(level, record.args().to_string());
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            ours = ours.with_location(file, line);
        }

        logger.write_record(&ours);
    }

    fn flush(&self) {
        self.logger().flush();
    }
}

/// Map log levels to our levels. `Trace` has no counterpart and logs as
/// `Debug`.
const fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

/// The most verbose `log` level that can pass a logger set to `level`
const fn max_level_filter(level: Level) -> LevelFilter {
    match level {
        Level::Debug => LevelFilter::Trace,
        Level::Info => LevelFilter::Info,
        Level::Warn => LevelFilter::Warn,
        Level::Error | Level::Panic | Level::Fatal => LevelFilter::Error,
    }
}

/// Initialize the log crate to use `logger`
///
/// This will capture all logs from crates using the `log` crate macros.
///
/// # Example
/// ```no_run
/// use proven_logger::{Flags, Level, Logger, compat::init_log_bridge};
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::new(std::io::stderr(), "", Flags::DEFAULT, Level::Info));
/// init_log_bridge(logger).expect("Failed to set log bridge");
/// ```
///
/// # Errors
///
/// Fails if a `log` logger is already installed.
pub fn init_log_bridge(logger: Arc<Logger>) -> Result<(), log::SetLoggerError> {
    let max_level = max_level_filter(logger.level());

    // We need to leak the bridge because log::set_logger requires 'static
    let bridge = Box::leak(Box::new(LogBridge::new(logger)));
    log::set_logger(bridge)?;
    log::set_max_level(max_level);
    Ok(())
}

/// Initialize the log crate to use the default logger, following later
/// calls to [`set_default_logger`](crate::set_default_logger).
///
/// # Errors
///
/// Fails if a `log` logger is already installed.
pub fn init_default_log_bridge() -> Result<(), log::SetLoggerError> {
    let bridge = Box::leak(Box::new(LogBridge::to_default()));
    log::set_logger(bridge)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
