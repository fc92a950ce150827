//! Error types for the logger

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running a logger
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Text that does not name a level
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    /// Text that does not name a format flag
    #[error("invalid log flag: {0:?}")]
    InvalidFlag(String),

    /// The log file could not be opened or rotated
    #[error(transparent)]
    File(#[from] proven_logger_file::Error),
}

impl Error {
    /// Whether this error leaves the logger's output in an unknown state.
    ///
    /// Configuration errors are recoverable. File errors are not: the process
    /// should stop rather than keep logging into a broken sink.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::File(_))
    }
}
