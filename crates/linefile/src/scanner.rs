// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded-memory chunk scanning
//!
//! All navigation reads storage through one fixed window. Memory use is the
//! window size no matter how far a scan travels; cost is one seek+read pair
//! per window.

use std::io::{self, Read, Seek, SeekFrom};
use std::ops::ControlFlow;

/// Scan window size in bytes
pub(crate) const WINDOW: usize = 32;

/// Record delimiter
pub(crate) const NEWLINE: u8 = b'\n';

/// Window-at-a-time cursor over seekable storage
pub(crate) struct Scanner<'a, S> {
    pub(crate) io: &'a mut S,
    pub(crate) window: &'a mut [u8; WINDOW],
}

impl<'a, S: Read + Seek> Scanner<'a, S> {
    pub(crate) fn new(io: &'a mut S, window: &'a mut [u8; WINDOW]) -> Self {
        Self { io, window }
    }

    /// Current byte offset
    pub(crate) fn position(&mut self) -> io::Result<u64> {
        self.io.stream_position()
    }

    pub(crate) fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.io.seek(pos)
    }

    /// Move the cursor back by `count` bytes
    pub(crate) fn rewind(&mut self, count: usize) -> io::Result<u64> {
        self.io.seek(SeekFrom::Current(-(count as i64)))
    }

    /// Visit successive windows from the cursor toward end-of-data
    ///
    /// Returns the value `visit` broke with, or `None` once a read returns
    /// no bytes. The cursor is left just past the last window read.
    pub(crate) fn scan_forward<T>(
        &mut self,
        mut visit: impl FnMut(&mut [u8]) -> ControlFlow<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let n = read_some(self.io, &mut self.window[..])?;
            if n == 0 {
                return Ok(None);
            }
            if let ControlFlow::Break(found) = visit(&mut self.window[..n]) {
                return Ok(Some(found));
            }
        }
    }

    /// Visit successive windows from the cursor toward file start
    ///
    /// Each window covers the bytes immediately below the previous one and
    /// is presented in file order. When `visit` breaks, the cursor is left
    /// at the end of the window it broke in. Every byte before the starting
    /// cursor is visited at most once.
    pub(crate) fn scan_backward<T>(
        &mut self,
        mut visit: impl FnMut(&mut [u8]) -> ControlFlow<T>,
    ) -> io::Result<Option<T>> {
        let mut remaining = self.position()?;
        while remaining > 0 {
            let count = remaining.min(WINDOW as u64) as usize;
            remaining = self.rewind(count)?;

            let n = read_full(self.io, &mut self.window[..count])?;
            if n == 0 {
                return Ok(None);
            }
            if let ControlFlow::Break(found) = visit(&mut self.window[..n]) {
                return Ok(Some(found));
            }
            if remaining == 0 {
                break;
            }
            self.rewind(n)?;
        }
        Ok(None)
    }
}

/// One read, retried on interruption
fn read_some<S: Read>(io: &mut S, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match io.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

/// Fill `buf` unless end-of-data comes first
fn read_full<S: Read>(io: &mut S, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = read_some(io, &mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
