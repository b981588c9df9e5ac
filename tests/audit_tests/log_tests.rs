//! Tests for AuditLog
//!
//! These tests verify:
//! - Entry format on disk
//! - tail() placeholders and last-n selection
//! - Concurrent appends never interleave within a line

use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use chrono::{Local, TimeZone};
use rosterdb::audit::{AuditLog, EMPTY_LOG_MESSAGE, NO_LOG_MESSAGE};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_log() -> (TempDir, AuditLog) {
    let temp_dir = TempDir::new().unwrap();
    let log = AuditLog::open(&temp_dir.path().join("server.log")).unwrap();
    (temp_dir, log)
}

fn peer() -> SocketAddr {
    "127.0.0.1:50412".parse().unwrap()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a").join("b").join("server.log");

    let log = AuditLog::open(&path).unwrap();

    assert!(path.parent().unwrap().is_dir());
    assert_eq!(log.path(), path.as_path());
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_writes_one_line() {
    let (_temp, log) = setup_log();
    let when = Local.with_ymd_and_hms(2025, 12, 8, 14, 3, 11).unwrap();

    log.append(when, peer(), "post trainer Ash 1 4 7");

    let contents = fs::read_to_string(log.path()).unwrap();
    assert_eq!(
        contents,
        "[2025-12-08 14:03:11] Client 127.0.0.1:50412 issued command: post trainer Ash 1 4 7\n"
    );
}

#[test]
fn test_record_appends_in_order() {
    let (_temp, log) = setup_log();

    log.record(peer(), "get trainer");
    log.record(peer(), "get trainer 1");
    log.record(peer(), "");

    let contents = fs::read_to_string(log.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("issued command: get trainer"));
    assert!(lines[1].ends_with("issued command: get trainer 1"));
    assert!(lines[2].ends_with("issued command: "));
}

#[test]
fn test_append_to_unwritable_path_is_swallowed() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the file should be
    let path = temp_dir.path().join("server.log");
    fs::create_dir(&path).unwrap();

    let log = AuditLog::open(&path).unwrap();
    log.record(peer(), "get trainer");

    assert_eq!(log.tail(5), NO_LOG_MESSAGE);
}

// =============================================================================
// Tail Tests
// =============================================================================

#[test]
fn test_tail_missing_file() {
    let (_temp, log) = setup_log();
    assert_eq!(log.tail(10), NO_LOG_MESSAGE);
}

#[test]
fn test_tail_empty_file() {
    let (_temp, log) = setup_log();
    fs::write(log.path(), "").unwrap();
    assert_eq!(log.tail(10), EMPTY_LOG_MESSAGE);
}

#[test]
fn test_tail_last_n_in_order() {
    let (_temp, log) = setup_log();
    for i in 0..15 {
        log.record(peer(), &format!("get trainer {}", i));
    }

    let tail = log.tail(3);
    let lines: Vec<&str> = tail.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("get trainer 12"));
    assert!(lines[1].ends_with("get trainer 13"));
    assert!(lines[2].ends_with("get trainer 14"));
    assert!(tail.ends_with('\n'));
}

#[test]
fn test_tail_more_than_available() {
    let (_temp, log) = setup_log();
    log.record(peer(), "get trainer");
    log.record(peer(), "exit");

    assert_eq!(log.tail(100).lines().count(), 2);
}

#[test]
fn test_tail_preserves_foreign_lines() {
    let (_temp, log) = setup_log();
    fs::write(log.path(), "first\nsecond\nthird").unwrap();

    assert_eq!(log.tail(2), "second\nthird");
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_appends_are_whole_lines() {
    let (_temp, log) = setup_log();
    let log = Arc::new(log);
    let num_threads = 8;
    let per_thread = 25;

    let mut handles = vec![];
    for t in 0..num_threads {
        let log = Arc::clone(&log);
        handles.push(thread::spawn(move || {
            let addr: SocketAddr = format!("10.0.0.{}:4000", t + 1).parse().unwrap();
            for i in 0..per_thread {
                log.record(addr, &format!("post trainer t{}_{} 1 4 7", t, i));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let contents = fs::read_to_string(log.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), num_threads * per_thread);
    for line in lines {
        assert!(line.starts_with('['));
        assert!(line.ends_with(" 1 4 7"));
    }
}
