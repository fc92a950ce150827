//! Test support utilities
//!
//! This module provides utilities for capturing logs during tests.
//! It's only available when the `test-support` feature is enabled.

use crate::{Flags, Level, Logger, set_default_logger};

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// An in-memory sink that can be handed to a [`Logger`] and read back.
#[derive(Clone, Debug, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A logger with no header that writes into this buffer
    #[must_use]
    pub fn logger(&self, level: Level) -> Logger {
        Logger::new(self.clone(), "", Flags::NONE, level)
    }

    /// Everything written so far
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written lines without their newlines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Whether nothing has been written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    /// Whether the captured output contains `text`
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.contents().contains(text)
    }

    /// Drop everything captured so far
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Test guard that routes the default logger into a buffer and prints the
/// captured lines if the test fails.
///
/// The previous default logger is restored when the guard drops.
pub struct TestLogGuard {
    buffer: CaptureBuffer,
    previous: Option<Arc<Logger>>,
    test_name: String,
    printed: bool,
}

impl TestLogGuard {
    /// Install a capturing default logger for the test `test_name`
    pub fn new(test_name: impl Into<String>) -> Self {
        let buffer = CaptureBuffer::new();
        let logger = Logger::new(buffer.clone(), "", Flags::SHORT_FILE, Level::Debug);
        let previous = set_default_logger(logger);

        Self {
            buffer,
            previous: Some(previous),
            test_name: test_name.into(),
            printed: false,
        }
    }

    /// Mark that the test passed (logs won't be printed)
    pub fn passed(&mut self) {
        self.printed = true;
    }

    /// The buffer receiving the default logger's lines
    #[must_use]
    pub fn buffer(&self) -> &CaptureBuffer {
        &self.buffer
    }
}

impl Drop for TestLogGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            set_default_logger(previous);
        }

        if !self.printed && std::thread::panicking() {
            let logs = self.buffer.contents();
            if !logs.is_empty() {
                eprintln!("\n===== Logs from failed test '{}' =====", self.test_name);
                eprint!("{logs}");
                eprintln!("===== End of logs =====\n");
            }
        }
    }
}
