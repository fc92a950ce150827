//! The process-wide default logger
//!
//! Free functions mirror the [`Logger`] methods and go to whichever logger is
//! installed when they run. Replacing the default while other threads log is
//! allowed; a line in flight goes to either the old or the new logger.

use crate::Logger;

use std::fmt::{self, Display};
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

static DEFAULT_LOGGER: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::default()));

/// The logger the free functions currently write to.
///
/// Until [`set_default_logger`] is called this writes everything from
/// `Debug` up to stderr with the default flags.
#[must_use]
pub fn default_logger() -> Arc<Logger> {
    DEFAULT_LOGGER.load_full()
}

/// Install `logger` as the default, returning the one it replaces.
pub fn set_default_logger(logger: impl Into<Arc<Logger>>) -> Arc<Logger> {
    DEFAULT_LOGGER.swap(logger.into())
}

macro_rules! default_level_fns {
    ($($name:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("[`Logger::", stringify!($name), "`] on the default logger.")]
                #[track_caller]
                pub fn $name(values: &[&dyn Display]) {
                    DEFAULT_LOGGER.load().$name(values);
                }

                #[doc = concat!("[`Logger::", stringify!($name), "ln`] on the default logger.")]
                #[track_caller]
                pub fn [<$name ln>](values: &[&dyn Display]) {
                    DEFAULT_LOGGER.load().[<$name ln>](values);
                }

                #[doc = concat!("[`Logger::", stringify!($name), "f`] on the default logger.")]
                #[track_caller]
                pub fn [<$name f>](args: fmt::Arguments<'_>) {
                    DEFAULT_LOGGER.load().[<$name f>](args);
                }
            )*
        }
    };
}

default_level_fns!(debug, info, warn, error, print);

/// [`Logger::panic`] on the default logger.
#[track_caller]
pub fn panic(values: &[&dyn Display]) -> ! {
    default_logger().panic(values)
}

/// [`Logger::panicln`] on the default logger.
#[track_caller]
pub fn panicln(values: &[&dyn Display]) -> ! {
    default_logger().panicln(values)
}

/// [`Logger::panicf`] on the default logger.
#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    default_logger().panicf(args)
}

/// [`Logger::fatal`] on the default logger.
#[track_caller]
pub fn fatal(values: &[&dyn Display]) -> ! {
    default_logger().fatal(values)
}

/// [`Logger::fatalln`] on the default logger.
#[track_caller]
pub fn fatalln(values: &[&dyn Display]) -> ! {
    default_logger().fatalln(values)
}

/// [`Logger::fatalf`] on the default logger.
#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    default_logger().fatalf(args)
}
