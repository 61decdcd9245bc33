use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use chrono::NaiveDateTime;
use pluggable_logger::{FileLogger, LogLevel, Logger};

fn assert_record(line: &str, level: LogLevel, message: &str) {
    let (timestamp, rest) = line.split_at(19);
    assert!(
        NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok(),
        "bad timestamp in {:?}",
        line
    );
    assert_eq!(rest, format!(" [{}] {}", level, message));
}

#[test]
fn every_level_appends_one_tagged_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = FileLogger::new(&path);

    for level in LogLevel::ALL {
        logger.log(&format!("message at {}", level), level);
    }

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.ends_with('\n'));
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1 + LogLevel::ALL.len());
    for (line, level) in lines[1..].iter().zip(LogLevel::ALL) {
        assert_record(line, level, &format!("message at {}", level));
    }
}

#[test]
fn creation_notice_is_written_once_as_first_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = FileLogger::new(&path);
    assert!(!path.exists());

    logger.info("first");
    logger.warn("second");
    logger.error("third");

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_record(
        lines[0],
        LogLevel::Info,
        &format!("Log file created: {}", path.display()),
    );
    assert_record(lines[1], LogLevel::Info, "first");
    assert_record(lines[2], LogLevel::Warn, "second");
    assert_record(lines[3], LogLevel::Error, "third");
    assert_eq!(contents.matches("Log file created").count(), 1);
}

#[test]
fn existing_file_is_appended_to_without_notice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "previous run\n").unwrap();

    FileLogger::new(&path).debug("resumed");

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "previous run");
    assert_record(lines[1], LogLevel::Debug, "resumed");
}

#[test]
fn file_removed_between_calls_is_recreated_with_notice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = FileLogger::new(&path);

    logger.info("before rotation");
    fs::remove_file(&path).unwrap();
    logger.info("after rotation");

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Log file created"));
    assert_record(lines[1], LogLevel::Info, "after rotation");
}

#[test]
fn concurrent_writers_never_merge_lines() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.log");
    let logger = Arc::new(FileLogger::new(&path));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(&format!("worker-{}-line-{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1 + THREADS * PER_THREAD);
    assert!(lines[0].contains("Log file created"));

    let mut seen = HashSet::new();
    for line in &lines[1..] {
        let message = line.split("[INFO] ").nth(1).unwrap();
        assert_record(line, LogLevel::Info, message);
        assert!(seen.insert(message.to_string()), "duplicate line {:?}", line);
    }
    assert_eq!(seen.len(), THREADS * PER_THREAD);
}
