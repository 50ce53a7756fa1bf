//! Line navigation specs
//!
//! Verify next/prev/seek-to-line and single-line reads over real files.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn three_lines(ws: &Workspace) -> File {
    let file = ws.open("events");
    file.write_lines(&["1", "2", "3"]);
    file.seek_to_start().unwrap();
    file
}

#[test]
fn next_line_from_file_start_lands_on_second_record() {
    let ws = Workspace::empty();
    let file = three_lines(&ws);

    file.next_line().unwrap();
    assert_eq!(file.line().as_deref(), Some("2"));
}

#[test]
fn next_line_after_a_read_skips_one_record() {
    let ws = Workspace::empty();
    let file = three_lines(&ws);

    assert_eq!(file.line().as_deref(), Some("1"));
    file.next_line().unwrap();
    assert_eq!(file.line().as_deref(), Some("3"));
}

#[test]
fn next_line_on_last_record_is_line_not_found() {
    let ws = Workspace::empty();
    let file = three_lines(&ws);
    file.seek_to_line(2).unwrap();
    let at = file.position().unwrap();

    assert!(matches!(file.next_line(), Err(FileError::LineNotFound)));
    assert_eq!(file.position().unwrap(), at);
}

#[test]
fn prev_line_walks_back_to_first_record() {
    let ws = Workspace::empty();
    let file = three_lines(&ws);
    file.seek_to_end().unwrap();

    file.prev_line().unwrap();
    file.prev_line().unwrap();
    file.prev_line().unwrap();
    assert_eq!(file.line().as_deref(), Some("1"));

    file.seek_to_start().unwrap();
    file.prev_line().unwrap();
    assert_eq!(file.position().unwrap(), 0);
}

#[test]
fn seek_to_line_is_zero_indexed() {
    let ws = Workspace::empty();
    let file = three_lines(&ws);

    for (n, expected) in ["1", "2", "3"].iter().enumerate() {
        file.seek_to_line(n as u64).unwrap();
        assert_eq!(file.line().as_deref(), Some(*expected));
    }
}

#[test]
fn seek_to_line_beyond_end_is_line_not_found() {
    let ws = Workspace::empty();
    let file = three_lines(&ws);

    assert!(matches!(file.seek_to_line(3), Err(FileError::LineNotFound)));
    assert!(matches!(file.seek_to_line(10900), Err(FileError::LineNotFound)));
    assert_eq!(file.position().unwrap(), 0);
}

#[test]
fn long_records_span_many_windows() {
    let ws = Workspace::empty();
    let long = "x".repeat(1000);
    let file = ws.open("events");
    file.write_lines(&["head", &long, "tail"]);

    file.seek_to_line(2).unwrap();
    file.prev_line().unwrap();
    assert_eq!(file.line(), Some(long));
    assert_eq!(file.line().as_deref(), Some("tail"));
}

#[test]
fn empty_records_are_counted_but_skipped_by_next_line() {
    let ws = Workspace::empty();
    ws.seed("events", b"a\n\n\nb\n");
    let file = ws.open("events");

    file.seek_to_line(3).unwrap();
    assert_eq!(file.line().as_deref(), Some("b"));

    file.seek_to_start().unwrap();
    file.next_line().unwrap();
    assert_eq!(file.line().as_deref(), Some("b"));
}

#[test]
fn unterminated_tail_is_not_a_record() {
    let ws = Workspace::empty();
    ws.seed("events", b"done\npartial");
    let file = ws.open("events");

    assert_eq!(file.line().as_deref(), Some("done"));
    assert_eq!(file.line(), None);
    assert_eq!(file.position().unwrap(), 5);
}

#[test]
fn read_lines_stops_early_on_break() {
    let ws = Workspace::empty();
    let file = three_lines(&ws);

    let mut first = None;
    file.read_lines(|line| {
        first = Some(line.to_vec());
        ControlFlow::Break(())
    })
    .unwrap();

    assert_eq!(first.as_deref(), Some(&b"1"[..]));
    assert_eq!(file.line().as_deref(), Some("2"));
}
