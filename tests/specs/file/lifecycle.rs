//! Line file lifecycle specs
//!
//! Verify open/close state rules, buffering and what reaches disk.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn construction_creates_missing_file() {
    let ws = Workspace::empty();
    let file = ws.open("events");

    assert!(file.is_open());
    assert_eq!(ws.raw("events"), b"");
}

#[test]
fn construction_rejects_unknown_backend() {
    let ws = Workspace::empty();
    let result = File::new(ws.options("events").backend("mmap"));

    match result {
        Err(FileError::InvalidBackend(name)) => assert_eq!(name, "mmap"),
        other => panic!("expected InvalidBackend, got {other:?}"),
    }
}

#[test]
fn closed_instance_refuses_work_until_reopened() {
    let ws = Workspace::empty();
    let file = File::new(ws.options("events").no_open(true)).unwrap();

    assert!(matches!(file.write_line(b"x"), Err(FileError::IsClosed)));
    assert!(matches!(file.seek_to_start(), Err(FileError::IsClosed)));
    assert!(matches!(file.close(), Err(FileError::IsClosed)));

    file.open().unwrap();
    assert!(matches!(file.open(), Err(FileError::IsOpen)));
    file.write_lines(&["x"]);
    assert_eq!(ws.raw("events"), b"x\n");
}

#[test]
fn writes_reach_disk_on_flush_not_before() {
    let ws = Workspace::empty();
    let file = ws.open("events");

    file.write_line(b"first").unwrap();
    assert_eq!(ws.raw("events"), b"");

    file.flush().unwrap();
    assert_eq!(ws.raw("events"), b"first\n");
}

#[test]
fn close_drains_pending_writes() {
    let ws = Workspace::empty();
    let file = File::new(ws.options("events").sync_on_close(true)).unwrap();

    file.write_line(b"pending").unwrap();
    file.close().unwrap();
    assert_eq!(ws.raw("events"), b"pending\n");
}

#[test]
fn reopening_existing_file_appends_after_prior_records() {
    let ws = Workspace::empty();
    ws.seed("events", b"old\n");
    let file = ws.open("events");

    file.write_lines(&["new"]);
    file.seek_to_start().unwrap();
    assert_eq!(file.rest(), vec!["old", "new"]);
    assert_eq!(ws.raw("events"), b"old\nnew\n");
}

#[test]
fn writes_land_at_end_whatever_the_cursor() {
    let ws = Workspace::empty();
    let file = ws.open("events");
    file.write_lines(&["1", "2"]);

    file.seek_to_start().unwrap();
    file.write_lines(&["3"]);
    assert_eq!(ws.raw("events"), b"1\n2\n3\n");
}

#[test]
fn aio_backend_round_trips_records() {
    let ws = Workspace::empty();
    let file = File::new(ws.options("events").backend("aio")).unwrap();

    file.write_lines(&["alpha", "beta"]);
    file.seek_to_start().unwrap();
    assert_eq!(file.rest(), vec!["alpha", "beta"]);
    file.close().unwrap();
}
