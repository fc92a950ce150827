//! Daily rotated log files
//!
//! This crate provides the file side of the leveled logger:
//! - A log file at a stable path that always holds the current day's lines
//! - Archiving of finished days as `<path>.<YYYYMMDD>`
//! - Lock-free appends with a single lock around the rotation itself
//! - A pluggable day [`Clock`] so day boundaries can be driven by tests

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod clock;
mod error;
mod rotating;

#[cfg(any(test, feature = "test-support"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use rotating::{DAY_SUFFIX_FORMAT, RotatingFile, archive_path, day_suffix};
