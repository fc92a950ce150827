//! Daily rotated log file
//!
//! The file at the base path always holds the current day's lines. When the
//! first write of a new day arrives, the base file is renamed to
//! `<path>.<YYYYMMDD>` (the day that just ended) and a fresh file is opened in
//! its place.
//!
//! Writes do not take a lock. Each line goes out as a single append-mode
//! write on the shared handle, which the OS keeps whole for lines below the
//! pipe/append atomicity limit (4 KiB on Linux). The only lock guards the
//! rotation itself.

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::{debug, info};

/// `strftime` layout of the archive suffix
pub const DAY_SUFFIX_FORMAT: &str = "%Y%m%d";

/// Format `day` as an 8-digit `YYYYMMDD` suffix.
#[must_use]
pub fn day_suffix(day: NaiveDate) -> String {
    day.format(DAY_SUFFIX_FORMAT).to_string()
}

/// Archive name for the file that held `day`'s lines: `<base>.<YYYYMMDD>`.
#[must_use]
pub fn archive_path(base: &Path, day: NaiveDate) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(day_suffix(day));
    PathBuf::from(name)
}

/// The open file together with the day it belongs to. Swapped as one unit.
#[derive(Debug)]
struct DayFile {
    day: NaiveDate,
    file: File,
}

/// A log file that is archived once per calendar day.
pub struct RotatingFile {
    path: PathBuf,
    current: ArcSwap<DayFile>,
    rotate_lock: Mutex<()>,
    clock: Arc<dyn Clock>,
}

impl RotatingFile {
    /// Open (create or append to) the log file at `path`, rotating by local
    /// calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    /// Like [`RotatingFile::open`] but reads the day from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the file cannot be opened.
    pub fn open_with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let day = clock.today();

        debug!(path = %path.display(), day = %day_suffix(day), "opened log file");

        Ok(Self {
            path,
            current: ArcSwap::from_pointee(DayFile { day, file }),
            rotate_lock: Mutex::new(()),
            clock,
        })
    }

    /// The base path that always holds the current day's lines
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The day the currently open file belongs to
    #[must_use]
    pub fn current_day(&self) -> NaiveDate {
        self.current.load().day
    }

    /// [`RotatingFile::current_day`] as a `YYYYMMDD` suffix
    #[must_use]
    pub fn current_suffix(&self) -> String {
        day_suffix(self.current_day())
    }

    /// Rotate if the clock has moved past the open file's day.
    ///
    /// Returns `true` when this call performed the rotation. Concurrent
    /// callers that race on the same boundary collapse into a single rename.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rotation`] if the base file cannot be renamed and
    /// [`Error::Open`] if the new base file cannot be opened.
    pub fn rotate_if_needed(&self) -> Result<bool> {
        if self.clock.today() <= self.current.load().day {
            return Ok(false);
        }

        self.rotate()
    }

    fn rotate(&self) -> Result<bool> {
        let _guard = self.rotate_lock.lock();

        // Another writer may have rotated while we waited for the lock.
        let today = self.clock.today();
        let stale = self.current.load_full();
        if today <= stale.day {
            return Ok(false);
        }

        let archive = archive_path(&self.path, stale.day);
        fs::rename(&self.path, &archive).map_err(|source| Error::Rotation {
            from: self.path.clone(),
            to: archive.clone(),
            source,
        })?;

        let file = open_append(&self.path)?;
        self.current.store(Arc::new(DayFile { day: today, file }));

        info!(
            path = %self.path.display(),
            archive = %archive.display(),
            "rotated log file"
        );

        // The old handle closes once in-flight writers holding it finish;
        // their lines land in the archive.
        drop(stale);

        Ok(true)
    }

    /// Append one rendered line to the current file.
    ///
    /// Does not check for rotation; call [`RotatingFile::rotate_if_needed`]
    /// first.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the underlying write.
    pub fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let current = self.current.load();
        (&current.file).write_all(line)
    }

    /// Flush the current file to the OS
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the underlying flush.
    pub fn flush(&self) -> io::Result<()> {
        let current = self.current.load();
        (&current.file).flush()
    }

    /// Pretend the open file was started on `day`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the open handle cannot be duplicated.
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_current_day(&self, day: NaiveDate) -> io::Result<()> {
        let _guard = self.rotate_lock.lock();
        let file = self.current.load().file.try_clone()?;
        self.current.store(Arc::new(DayFile { day, file }));
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("day", &self.current_day())
            .finish_non_exhaustive()
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
}
