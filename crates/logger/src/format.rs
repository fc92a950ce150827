//! Message rendering and line layout

use crate::{Flags, Record};

use std::fmt::{self, Display, Write};

/// The three ways a message can be built from its arguments.
#[derive(Clone, Copy)]
pub enum Message<'a> {
    /// Values written back to back
    Print(&'a [&'a dyn Display]),
    /// Values separated by single spaces, followed by a newline
    Println(&'a [&'a dyn Display]),
    /// A format string with its arguments
    Format(fmt::Arguments<'a>),
}

impl Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Print(values) => values.iter().try_for_each(|value| value.fmt(f)),
            Self::Println(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    value.fmt(f)?;
                }
                f.write_char('\n')
            }
            Self::Format(args) => f.write_fmt(*args),
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Message").field(&self.to_string()).finish()
    }
}

/// Prefix and header flags applied to every line of a logger
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineFormat {
    prefix: String,
    flags: Flags,
}

impl LineFormat {
    /// Create a line layout
    pub fn new(prefix: impl Into<String>, flags: Flags) -> Self {
        Self {
            prefix: prefix.into(),
            flags,
        }
    }

    /// Text written at the start of each line (or before the message with
    /// [`Flags::MSG_PREFIX`])
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Header flags
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Render `record` as one newline-terminated line:
    /// `[prefix][date ][time ][file:line: ][prefix]LEVEL message\n`
    #[must_use]
    pub fn format(&self, record: &Record<'_>) -> String {
        let mut line = String::with_capacity(self.prefix.len() + record.message.len() + 48);

        if !self.flags.contains(Flags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }
        self.write_header(&mut line, record);
        if self.flags.contains(Flags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }

        line.push_str(record.level.as_str());
        line.push(' ');
        line.push_str(&record.message);
        if !line.ends_with('\n') {
            line.push('\n');
        }

        line
    }

    fn write_header(&self, line: &mut String, record: &Record<'_>) {
        let flags = self.flags;

        if flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS) {
            let time = if flags.contains(Flags::UTC) {
                record.timestamp.naive_utc()
            } else {
                record.timestamp.naive_local()
            };

            if flags.contains(Flags::DATE) {
                let _ = write!(line, "{} ", time.format("%Y/%m/%d"));
            }
            if flags.contains(Flags::MICROSECONDS) {
                let _ = write!(line, "{} ", time.format("%H:%M:%S%.6f"));
            } else if flags.contains(Flags::TIME) {
                let _ = write!(line, "{} ", time.format("%H:%M:%S"));
            }
        }

        if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
            let mut file = record.file.unwrap_or("???");
            if flags.contains(Flags::SHORT_FILE) {
                file = short_file(file);
            }
            let _ = write!(line, "{file}:{}: ", record.line.unwrap_or(0));
        }
    }
}

/// Final path element of a source path
fn short_file(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}
