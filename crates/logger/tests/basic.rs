//! Basic tests for the logger

use proven_logger::*;
use serial_test::serial;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

fn file_logger(path: &Path, flags: Flags, level: Level) -> Logger {
    Logger::new(File::create(path).unwrap(), "", flags, level)
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
#[serial]
fn test_default_logger_functions() {
    let dir = tempfile::tempdir().unwrap();
    let debug_path = dir.path().join("debug.log");
    let path = dir.path().join("info.log");

    let previous = set_default_logger(file_logger(&debug_path, Flags::NONE, Level::Debug));

    debug(&[&"Debug: foo"]);
    debugf(format_args!("Debug: {}", "foo"));
    info(&[&"Info: foo"]);
    infof(format_args!("Info: {}", "foo"));
    warn(&[&"Warn: foo"]);
    warnf(format_args!("Warn: {}", "foo"));
    error(&[&"Error: foo"]);
    errorf(format_args!("Error: {}", "foo"));

    set_default_logger(file_logger(&path, Flags::NONE, Level::Info));

    debug(&[&"Debug: bar"]);
    debugf(format_args!("Debug: {}", "bar"));
    info(&[&"Info: bar"]);
    infoln(&[&"Info:", &"bar"]);
    warn(&[&"Warn: bar"]);
    warnln(&[&"Warn:", &"bar"]);
    error(&[&"Error: bar"]);
    errorln(&[&"Error:", &"bar"]);
    print(&[&"Print: bar"]);
    println(&[&"Print:", &"bar"]);
    printf(format_args!("Print: {}", "bar"));

    set_default_logger(previous);

    assert_eq!(
        lines(&debug_path),
        [
            "DEBUG Debug: foo",
            "DEBUG Debug: foo",
            "INFO Info: foo",
            "INFO Info: foo",
            "WARN Warn: foo",
            "WARN Warn: foo",
            "ERROR Error: foo",
            "ERROR Error: foo",
        ]
    );
    assert_eq!(
        lines(&path),
        [
            "INFO Info: bar",
            "INFO Info: bar",
            "WARN Warn: bar",
            "WARN Warn: bar",
            "ERROR Error: bar",
            "ERROR Error: bar",
            "INFO Print: bar",
            "INFO Print: bar",
            "INFO Print: bar",
        ]
    );
}

#[test]
#[serial]
fn test_set_default_returns_previous() {
    let dir = tempfile::tempdir().unwrap();
    let first = Arc::new(file_logger(&dir.path().join("a.log"), Flags::NONE, Level::Warn));

    let original = set_default_logger(first.clone());
    assert!(Arc::ptr_eq(&default_logger(), &first));

    let replaced = set_default_logger(original);
    assert!(Arc::ptr_eq(&replaced, &first));
}

#[test]
#[serial]
fn test_macros_use_default_logger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macros.log");
    let previous = set_default_logger(file_logger(&path, Flags::NONE, Level::Debug));

    let value = 42;
    debugf!("The answer is {value}");
    infof!("The answer is {}", value);
    warnf!("careful");
    errorf!("failed after {} attempts", 3);
    printf!("printed");

    set_default_logger(previous);

    assert_eq!(
        lines(&path),
        [
            "DEBUG The answer is 42",
            "INFO The answer is 42",
            "WARN careful",
            "ERROR failed after 3 attempts",
            "INFO printed",
        ]
    );
}

#[test]
fn test_macros_with_explicit_logger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("explicit.log");
    let logger = Arc::new(file_logger(&path, Flags::NONE, Level::Info));

    debugf!(logger => "hidden {}", 1);
    infof!(logger => "shown {}", 2);
    errorf!(&logger => "shown {}", 3);

    assert_eq!(lines(&path), ["INFO shown 2", "ERROR shown 3"]);
}

#[test]
fn test_short_file_points_at_this_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("location.log");
    let logger = file_logger(&path, Flags::SHORT_FILE, Level::Debug);

    let line = line!() + 1;
    logger.warnf(format_args!("here"));

    assert_eq!(lines(&path), [format!("basic.rs:{line}: WARN here")]);
}

#[test]
fn test_default_flags_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("header.log");
    let logger = file_logger(&path, Flags::DEFAULT, Level::Debug);

    logger.infof(format_args!("Info: {}", "foo"));

    let written = lines(&path);
    assert_eq!(written.len(), 1);
    // 2009/01/23 01:23:23 basic.rs:NN: INFO Info: foo
    let parts: Vec<&str> = written[0].splitn(4, ' ').collect();
    assert_eq!(parts[0].len(), 10);
    assert_eq!(parts[0].matches('/').count(), 2);
    assert_eq!(parts[1].len(), 8);
    assert!(parts[2].starts_with("basic.rs:"));
    assert_eq!(parts[3], "INFO Info: foo");
}

#[test]
#[serial]
fn test_default_panic_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panic.log");
    let previous = set_default_logger(file_logger(&path, Flags::NONE, Level::Debug));

    let result = std::panic::catch_unwind(|| {
        panicf!("invariant broken: {}", "x");
    });

    set_default_logger(previous);

    let payload = result.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("invariant broken: x")
    );
    assert_eq!(lines(&path), ["PANIC invariant broken: x"]);
}

#[test]
fn test_concurrent_writers_keep_lines_whole() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("threads.log");
    let logger = Arc::new(file_logger(&path, Flags::NONE, Level::Debug));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = logger.clone();
            std::thread::spawn(move || {
                for i in 0..200 {
                    logger.infof(format_args!("thread {t} line {i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let written = lines(&path);
    assert_eq!(written.len(), 8 * 200);
    for line in &written {
        assert!(line.starts_with("INFO thread "), "torn line: {line:?}");
    }
}
