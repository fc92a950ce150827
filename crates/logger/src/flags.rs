//! Line header flags

use crate::error::Error;

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which annotations the line writer puts in front of each message.
///
/// Flags combine with `|`:
///
/// ```
/// use proven_logger::Flags;
///
/// let flags = Flags::DATE | Flags::TIME | Flags::SHORT_FILE;
/// assert_eq!(flags, Flags::DEFAULT);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Flags(u8);

const NAMES: [(Flags, &str); 7] = [
    (Flags::DATE, "date"),
    (Flags::TIME, "time"),
    (Flags::MICROSECONDS, "microseconds"),
    (Flags::LONG_FILE, "longfile"),
    (Flags::SHORT_FILE, "shortfile"),
    (Flags::UTC, "utc"),
    (Flags::MSG_PREFIX, "msgprefix"),
];

impl Flags {
    /// No header at all
    pub const NONE: Self = Self(0);
    /// Local date: `2009/01/23`
    pub const DATE: Self = Self(1);
    /// Local time: `01:23:23`
    pub const TIME: Self = Self(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies `TIME`.
    pub const MICROSECONDS: Self = Self(1 << 2);
    /// Full source path and line: `/a/b/c/d.rs:23`
    pub const LONG_FILE: Self = Self(1 << 3);
    /// Final path element and line: `d.rs:23`. Overrides `LONG_FILE`.
    pub const SHORT_FILE: Self = Self(1 << 4);
    /// Use UTC rather than the local time zone
    pub const UTC: Self = Self(1 << 5);
    /// Put the prefix right before the message instead of at line start
    pub const MSG_PREFIX: Self = Self(1 << 6);
    /// Date and time
    pub const STD: Self = Self(Self::DATE.0 | Self::TIME.0);
    /// Date, time and short file:line
    pub const DEFAULT: Self = Self(Self::STD.0 | Self::SHORT_FILE.0);

    /// Whether every flag in `other` is set
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any flag in `other` is set
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no flag is set
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Both sets of flags
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Names of the individual flags that are set
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Flags(NONE)");
        }
        write!(f, "Flags({})", self.names().collect::<Vec<_>>().join(" | "))
    }
}

impl FromStr for Flags {
    type Err = Error;

    /// Parse one flag name (or `std` / `default`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "std" => return Ok(Self::STD),
            "default" => return Ok(Self::DEFAULT),
            "none" => return Ok(Self::NONE),
            _ => {}
        }

        NAMES
            .into_iter()
            .find(|(_, flag_name)| *flag_name == name)
            .map(|(flag, _)| flag)
            .ok_or_else(|| Error::InvalidFlag(s.to_string()))
    }
}

impl TryFrom<Vec<String>> for Flags {
    type Error = Error;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names
            .iter()
            .try_fold(Self::NONE, |acc, name| Ok(acc | name.parse::<Self>()?))
    }
}

impl From<Flags> for Vec<String> {
    fn from(flags: Flags) -> Self {
        flags.names().map(str::to_owned).collect()
    }
}
