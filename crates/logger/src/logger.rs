//! The leveled logger

use crate::error::{Error, Result};
use crate::format::{LineFormat, Message};
use crate::{Flags, Level, Record};

use std::fmt::{self, Display};
use std::io::{self, Write};
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use proven_logger_file::RotatingFile;
use tracing::error;

/// Exit status used by the fatal entry points
pub const FATAL_EXIT_CODE: i32 = 1;

/// Called when the log output breaks (for example a rotation that cannot
/// rename or reopen the file).
pub type FailureHandler = Arc<dyn Fn(&Error) + Send + Sync>;

/// Default [`FailureHandler`]: report the error on stderr and exit.
///
/// A logger whose file could not be rotated has no trustworthy place left to
/// write to, so the process stops instead of carrying on without logs.
pub fn exit_on_failure(err: &Error) {
    error!(%err, "log output failed");
    eprintln!("log output failed: {err}");
    std::process::exit(FATAL_EXIT_CODE);
}

enum Sink {
    /// Any writer; writes are serialized by the mutex
    Writer(Mutex<Box<dyn Write + Send>>),
    /// Daily rotated file; writes are single appends without a lock
    Rotating(RotatingFile),
}

/// A leveled logger writing to one sink.
///
/// Every entry point goes through the same path: drop the line if its level
/// is below [`Logger::level`], rotate the file if the day changed, render the
/// line and write it in one piece.
///
/// Each level has three forms:
/// - `info(&[&a, &b])` writes the values back to back,
/// - `infoln(&[&a, &b])` separates them with spaces,
/// - `infof(format_args!(..))` takes a format string.
///
/// The `print*` methods log at [`Level::Info`]. The `panic*` methods panic
/// with the message after logging it, and the `fatal*` methods exit the
/// process with [`FATAL_EXIT_CODE`].
pub struct Logger {
    format: LineFormat,
    level: Level,
    sink: Sink,
    on_failure: FailureHandler,
}

macro_rules! level_methods {
    ($($level:ident => $name:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Log `values` back to back at [`Level::", stringify!($level), "`].")]
                #[track_caller]
                pub fn $name(&self, values: &[&dyn Display]) {
                    self.log(Level::$level, Message::Print(values));
                }

                #[doc = concat!("Log `values` separated by spaces at [`Level::", stringify!($level), "`].")]
                #[track_caller]
                pub fn [<$name ln>](&self, values: &[&dyn Display]) {
                    self.log(Level::$level, Message::Println(values));
                }

                #[doc = concat!("Log a formatted message at [`Level::", stringify!($level), "`].")]
                #[track_caller]
                pub fn [<$name f>](&self, args: fmt::Arguments<'_>) {
                    self.log(Level::$level, Message::Format(args));
                }
            )*
        }
    };
}

impl Logger {
    /// Create a logger writing to `writer`.
    pub fn new(
        writer: impl Write + Send + 'static,
        prefix: impl Into<String>,
        flags: Flags,
        level: Level,
    ) -> Self {
        Self {
            format: LineFormat::new(prefix, flags),
            level,
            sink: Sink::Writer(Mutex::new(Box::new(writer))),
            on_failure: Arc::new(exit_on_failure),
        }
    }

    /// Create a logger writing to the file at `path`, archived once per day
    /// as `<path>.<YYYYMMDD>`.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`Error::File`] if the file cannot be opened.
    pub fn rotating(
        path: impl Into<PathBuf>,
        prefix: impl Into<String>,
        flags: Flags,
        level: Level,
    ) -> Result<Self> {
        let file = RotatingFile::open(path)?;
        Ok(Self::with_rotating_file(file, prefix, flags, level))
    }

    /// Create a logger around an already opened [`RotatingFile`].
    pub fn with_rotating_file(
        file: RotatingFile,
        prefix: impl Into<String>,
        flags: Flags,
        level: Level,
    ) -> Self {
        Self {
            format: LineFormat::new(prefix, flags),
            level,
            sink: Sink::Rotating(file),
            on_failure: Arc::new(exit_on_failure),
        }
    }

    /// Replace the [`FailureHandler`] (by default [`exit_on_failure`]).
    #[must_use]
    pub fn on_failure(mut self, handler: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.on_failure = Arc::new(handler);
        self
    }

    /// Minimum level that gets written
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Line prefix
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.format.prefix()
    }

    /// Header flags
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.format.flags()
    }

    /// The rotated file, if this logger writes to one
    #[must_use]
    pub const fn rotating_file(&self) -> Option<&RotatingFile> {
        match &self.sink {
            Sink::Rotating(file) => Some(file),
            Sink::Writer(_) => None,
        }
    }

    /// Whether a line at `level` would be written
    #[inline(always)]
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level.is_enabled(self.level)
    }

    /// Log `message` at `level`, annotated with the caller's location.
    ///
    /// Unlike the `panic*` and `fatal*` methods this never panics or exits
    /// because of the level.
    #[track_caller]
    pub fn log(&self, level: Level, message: Message<'_>) {
        if !self.is_enabled(level) {
            return;
        }

        let record = Record::new(level, message.to_string()).with_caller(Location::caller());
        self.output(&record);
    }

    /// Write a prepared record if its level is enabled.
    pub fn write_record(&self, record: &Record<'_>) {
        if self.is_enabled(record.level) {
            self.output(record);
        }
    }

    /// Flush the sink
    pub fn flush(&self) {
        let _ = match &self.sink {
            Sink::Writer(writer) => writer.lock().flush(),
            Sink::Rotating(file) => file.flush(),
        };
    }

    level_methods! {
        Debug => debug,
        Info => info,
        Warn => warn,
        Error => error,
        Info => print,
    }

    /// Log `values` back to back at [`Level::Panic`], then panic with them.
    #[track_caller]
    pub fn panic(&self, values: &[&dyn Display]) -> ! {
        self.raise(Message::Print(values))
    }

    /// Log `values` separated by spaces at [`Level::Panic`], then panic with
    /// them.
    #[track_caller]
    pub fn panicln(&self, values: &[&dyn Display]) -> ! {
        self.raise(Message::Println(values))
    }

    /// Log a formatted message at [`Level::Panic`], then panic with it.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.raise(Message::Format(args))
    }

    /// Log `values` back to back at [`Level::Fatal`], then exit.
    #[track_caller]
    pub fn fatal(&self, values: &[&dyn Display]) -> ! {
        self.terminate(Message::Print(values))
    }

    /// Log `values` separated by spaces at [`Level::Fatal`], then exit.
    #[track_caller]
    pub fn fatalln(&self, values: &[&dyn Display]) -> ! {
        self.terminate(Message::Println(values))
    }

    /// Log a formatted message at [`Level::Fatal`], then exit.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.terminate(Message::Format(args))
    }

    /// The message is raised even when the panic level is filtered out.
    #[track_caller]
    fn raise(&self, message: Message<'_>) -> ! {
        let text = message.to_string();
        if self.is_enabled(Level::Panic) {
            let record = Record::new(Level::Panic, text.as_str()).with_caller(Location::caller());
            self.output(&record);
        }
        panic!("{text}");
    }

    #[track_caller]
    fn terminate(&self, message: Message<'_>) -> ! {
        self.log(Level::Fatal, message);
        self.flush();
        std::process::exit(FATAL_EXIT_CODE);
    }

    fn output(&self, record: &Record<'_>) {
        if let Sink::Rotating(file) = &self.sink {
            if let Err(err) = file.rotate_if_needed() {
                (self.on_failure)(&Error::from(err));
            }
        }

        let line = self.format.format(record);
        self.write_line(line.as_bytes());
    }

    fn write_line(&self, line: &[u8]) {
        match &self.sink {
            Sink::Writer(writer) => {
                let mut writer = writer.lock();
                let _ = writer.write_all(line);
                let _ = writer.flush();
            }
            Sink::Rotating(file) => {
                let _ = file.write_line(line);
            }
        }
    }
}

impl Default for Logger {
    /// Standard error, default flags, everything from [`Level::Debug`] up.
    fn default() -> Self {
        Self::new(io::stderr(), "", Flags::DEFAULT, Level::Debug)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Logger");
        s.field("level", &self.level).field("format", &self.format);
        match &self.sink {
            Sink::Writer(_) => s.field("sink", &"writer"),
            Sink::Rotating(file) => s.field("sink", file),
        };
        s.finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CaptureBuffer;

    use std::fs;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proven_logger_file::{ManualClock, archive_path};

    fn capture(level: Level) -> (CaptureBuffer, Logger) {
        let buffer = CaptureBuffer::new();
        let logger = Logger::new(buffer.clone(), "", Flags::NONE, level);
        (buffer, logger)
    }

    fn read_lines(path: &std::path::Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_infof_renders_tag_and_message() {
        let (buffer, logger) = capture(Level::Debug);
        logger.infof(format_args!("Info: {}", "foo"));
        assert_eq!(buffer.contents(), "INFO Info: foo\n");
    }

    #[test]
    fn test_rendering_modes() {
        let (buffer, logger) = capture(Level::Debug);
        logger.debug(&[&"a", &1, &"b"]);
        logger.warnln(&[&"a", &1, &"b"]);
        logger.errorf(format_args!("{}-{}", 1, 2));

        assert_eq!(buffer.lines(), ["DEBUG a1b", "WARN a 1 b", "ERROR 1-2"]);
    }

    #[test]
    fn test_warn_threshold() {
        let (buffer, logger) = capture(Level::Warn);

        logger.debug(&[&"Debug: bar"]);
        logger.debugf(format_args!("Debug: {}", "bar"));
        logger.info(&[&"Info: bar"]);
        logger.infof(format_args!("Info: {}", "bar"));
        assert!(buffer.is_empty());

        logger.warn(&[&"Warn: bar"]);
        logger.error(&[&"Error: bar"]);
        assert_eq!(buffer.lines(), ["WARN Warn: bar", "ERROR Error: bar"]);
    }

    #[test]
    fn test_emits_iff_level_at_least_minimum() {
        for min in Level::ALL {
            let (buffer, logger) = capture(min);
            for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
                logger.log(level, Message::Print(&[&"x"]));
            }
            let expected: Vec<_> = [Level::Debug, Level::Info, Level::Warn, Level::Error]
                .into_iter()
                .filter(|level| *level >= min)
                .map(|level| format!("{level} x"))
                .collect();
            assert_eq!(buffer.lines(), expected, "min={min}");
        }
    }

    #[test]
    fn test_print_aliases_log_at_info() {
        let (buffer, logger) = capture(Level::Info);
        logger.print(&[&"p"]);
        logger.println(&[&"p", &"ln"]);
        logger.printf(format_args!("p{}", 'f'));
        assert_eq!(buffer.lines(), ["INFO p", "INFO p ln", "INFO pf"]);

        let (buffer, logger) = capture(Level::Warn);
        logger.print(&[&"hidden"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_location_points_at_call_site() {
        let buffer = CaptureBuffer::new();
        let logger = Logger::new(buffer.clone(), "", Flags::SHORT_FILE, Level::Debug);

        let line = line!() + 1;
        logger.info(&[&"here"]);

        assert_eq!(buffer.contents(), format!("logger.rs:{line}: INFO here\n"));
    }

    #[test]
    fn test_prefix_and_accessors() {
        let buffer = CaptureBuffer::new();
        let logger = Logger::new(buffer.clone(), "app: ", Flags::NONE, Level::Info);

        assert_eq!(logger.prefix(), "app: ");
        assert_eq!(logger.flags(), Flags::NONE);
        assert_eq!(logger.level(), Level::Info);
        assert!(logger.rotating_file().is_none());

        logger.info(&[&"up"]);
        assert_eq!(buffer.contents(), "app: INFO up\n");
    }

    #[test]
    fn test_panic_logs_then_raises_message() {
        let (buffer, logger) = capture(Level::Debug);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.panicf(format_args!("bad {}", 42));
        }));

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().unwrap(), "bad 42");
        assert_eq!(buffer.lines(), ["PANIC bad 42"]);
    }

    #[test]
    fn test_filtered_panic_still_raises() {
        let (buffer, logger) = capture(Level::Fatal);

        let result = panic::catch_unwind(AssertUnwindSafe(|| logger.panic(&[&"quiet"])));

        assert!(result.is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_panicln_propagates() {
        let (_buffer, logger) = capture(Level::Debug);
        logger.panicln(&[&"boom"]);
    }

    #[test]
    fn test_rotating_logger_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let logger = Logger::rotating(&path, "", Flags::DEFAULT, Level::Info).unwrap();
        let file = logger.rotating_file().unwrap();
        let yesterday = file.current_day().pred_opt().unwrap();

        logger.info(&[&"log 1"]);
        logger.info(&[&"log 2"]);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO log 1"));
        assert!(lines[1].ends_with("INFO log 2"));

        file.set_current_day(yesterday).unwrap();

        logger.info(&[&"log 3"]);
        logger.info(&[&"log 4"]);

        let archived = read_lines(&archive_path(&path, yesterday));
        assert_eq!(archived, lines);

        let current = read_lines(&path);
        assert_eq!(current.len(), 2);
        assert!(current[0].ends_with("INFO log 3"));
        assert!(current[1].ends_with("INFO log 4"));
    }

    #[test]
    fn test_filtered_lines_do_not_rotate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let day = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let clock = Arc::new(ManualClock::new(day));
        let file = RotatingFile::open_with_clock(&path, clock.clone()).unwrap();
        let logger = Logger::with_rotating_file(file, "", Flags::NONE, Level::Warn);

        clock.advance(1);
        logger.debug(&[&"skipped"]);
        assert!(!archive_path(&path, day).exists());

        logger.warn(&[&"kept"]);
        assert!(archive_path(&path, day).exists());
        assert_eq!(read_lines(&path), ["WARN kept"]);
    }

    #[test]
    fn test_rotation_failure_reaches_handler() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let day = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let clock = Arc::new(ManualClock::new(day));
        let file = RotatingFile::open_with_clock(&path, clock.clone()).unwrap();

        let failures = Arc::new(AtomicUsize::new(0));
        let seen = failures.clone();
        let logger = Logger::with_rotating_file(file, "", Flags::NONE, Level::Info).on_failure(
            move |err| {
                assert!(err.is_fatal());
                seen.fetch_add(1, Ordering::SeqCst);
            },
        );

        fs::remove_file(&path).unwrap();
        clock.advance(1);
        logger.info(&[&"lost"]);

        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rotating_constructor_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = Logger::rotating(
            dir.path().join("nope").join("app.log"),
            "",
            Flags::DEFAULT,
            Level::Info,
        )
        .unwrap_err();

        assert!(err.is_fatal());
    }
}
