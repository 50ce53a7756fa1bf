//! Append specs
//!
//! Verify file-to-file append and its locking.

use crate::prelude::*;
use similar_asserts::assert_eq;
use std::thread;

#[test]
fn append_copies_source_from_its_cursor() {
    let ws = Workspace::empty();
    let dst = ws.open("dst");
    let src = ws.open("src");
    dst.write_lines(&["d"]);
    src.write_lines(&["s1", "s2", "s3"]);
    src.seek_to_line(1).unwrap();

    dst.append(&src).unwrap();

    assert_eq!(ws.raw("dst"), b"d\ns2\ns3\n");
    assert_eq!(ws.raw("src"), b"s1\ns2\ns3\n");
}

#[test]
fn append_drains_destination_writes_first() {
    let ws = Workspace::empty();
    let dst = ws.open("dst");
    let src = ws.open("src");
    src.write_lines(&["s"]);
    src.seek_to_start().unwrap();
    dst.write_line(b"buffered").unwrap();

    dst.append(&src).unwrap();
    assert_eq!(ws.raw("dst"), b"buffered\ns\n");
}

#[test]
fn append_to_itself_is_rejected() {
    let ws = Workspace::empty();
    let file = ws.open("events");
    assert!(matches!(file.append(&file), Err(FileError::SelfAppend)));
}

#[test]
fn append_with_closed_side_is_rejected() {
    let ws = Workspace::empty();
    let open = ws.open("open");
    let closed = File::new(ws.options("closed").no_open(true)).unwrap();

    assert!(matches!(open.append(&closed), Err(FileError::IsClosed)));
    assert!(matches!(closed.append(&open), Err(FileError::IsClosed)));
}

#[test]
fn concurrent_opposite_appends_complete() {
    let ws = Workspace::empty();
    let a = ws.open("a");
    let b = ws.open("b");
    a.write_lines(&["a"]);
    b.write_lines(&["b"]);

    let copy_last = |dst: &File, src: &File| -> u64 {
        let mut copied = 0;
        for _ in 0..100 {
            src.seek_to_end().unwrap();
            src.prev_line().unwrap();
            copied += dst.append(src).unwrap();
        }
        copied
    };

    let (into_a, into_b) = thread::scope(|s| {
        let to_a = s.spawn(|| copy_last(&a, &b));
        let to_b = s.spawn(|| copy_last(&b, &a));
        (to_a.join().unwrap(), to_b.join().unwrap())
    });

    for (name, copied) in [("a", into_a), ("b", into_b)] {
        let raw = ws.raw(name);
        assert_eq!(raw.len() as u64, 2 + copied);
        assert!(raw.chunks(2).all(|record| record == b"a\n" || record == b"b\n"));
    }
}

#[test]
fn append_between_instances_on_one_location_terminates() {
    let ws = Workspace::empty();
    let writer = ws.open("shared");
    let reader = ws.open("shared");
    writer.write_lines(&["x", "y"]);

    assert_eq!(writer.append(&reader).unwrap(), 4);
    assert_eq!(ws.raw("shared"), b"x\ny\nx\ny\n");
}
