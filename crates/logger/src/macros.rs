//! Format-string logging macros
//!
//! Each macro takes `format!` arguments and logs through the default logger,
//! or through an explicit one when the arguments start with `logger =>`:
//!
//! ```
//! use proven_logger::{Flags, Level, Logger, infof};
//!
//! let logger = Logger::new(std::io::sink(), "", Flags::DEFAULT, Level::Info);
//! infof!(logger => "listening on port {}", 8080);
//! infof!("via the default logger: {}", "ok");
//! ```

/// Log a formatted message at [`Level::Debug`](crate::Level::Debug)
#[macro_export]
macro_rules! debugf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::debugf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Info`](crate::Level::Info)
#[macro_export]
macro_rules! infof {
    ($logger:expr => $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::infof(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Warn`](crate::Level::Warn)
#[macro_export]
macro_rules! warnf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::warnf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Error`](crate::Level::Error)
#[macro_export]
macro_rules! errorf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::errorf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Info`](crate::Level::Info)
#[macro_export]
macro_rules! printf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.printf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::printf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Panic`](crate::Level::Panic), then
/// panic with it
#[macro_export]
macro_rules! panicf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.panicf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::panicf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at [`Level::Fatal`](crate::Level::Fatal), then
/// exit the process
#[macro_export]
macro_rules! fatalf {
    ($logger:expr => $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::fatalf(::std::format_args!($($arg)+))
    };
}
