//! Calendar-day source used to decide when a file rotates

use chrono::{Local, NaiveDate};

/// Supplies the current calendar day.
pub trait Clock: Send + Sync + 'static {
    /// The day log lines written right now belong to
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-support"))]
mod manual {
    use super::Clock;
    use chrono::{Days, NaiveDate};
    use parking_lot::Mutex;

    /// A clock that only moves when told to.
    #[derive(Debug)]
    pub struct ManualClock {
        day: Mutex<NaiveDate>,
    }

    impl ManualClock {
        /// Create a clock stopped at `day`
        #[must_use]
        pub fn new(day: NaiveDate) -> Self {
            Self {
                day: Mutex::new(day),
            }
        }

        /// Jump to `day`
        pub fn set(&self, day: NaiveDate) {
            *self.day.lock() = day;
        }

        /// Move forward by `days` calendar days, stopping at the last
        /// representable date
        pub fn advance(&self, days: u64) {
            let mut day = self.day.lock();
            *day = day.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        }
    }

    impl Clock for ManualClock {
        fn today(&self) -> NaiveDate {
            *self.day.lock()
        }
    }
}
