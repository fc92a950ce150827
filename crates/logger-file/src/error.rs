//! Error types for file-based logging

use std::io;
use std::path::PathBuf;

/// Result type for file logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while managing a rotated log file.
///
/// Every variant is an infrastructure failure: the file the logger writes to
/// is no longer in a known state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to open the log file at its base path
    #[error("failed to open log file {path}: {source}")]
    Open {
        /// The path that could not be opened
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to move the finished day's file to its archive name
    #[error("failed to rotate log file {from} to {to}: {source}")]
    Rotation {
        /// The base log path
        from: PathBuf,
        /// The archive path
        to: PathBuf,
        /// The underlying error
        source: io::Error,
    },
}
