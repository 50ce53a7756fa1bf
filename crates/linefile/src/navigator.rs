// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line navigation without an index
//!
//! Every successful call leaves the cursor on the first byte of the target
//! record.

use crate::error::FileError;
use crate::scanner::{Scanner, NEWLINE};
use std::io::{Read, Seek, SeekFrom};
use std::ops::ControlFlow;

impl<S: Read + Seek> Scanner<'_, S> {
    /// Move to the start of the record after the one under the cursor
    ///
    /// Looks for a delimiter followed by a non-delimiter byte, possibly in a
    /// later window. Runs of empty records are skipped. Fails with
    /// `LineNotFound`, cursor unchanged, if no such byte exists.
    pub(crate) fn next_line(&mut self) -> Result<(), FileError> {
        let start = self.position()?;
        let mut newline_seen = false;

        let back = self.scan_forward(|chunk| {
            for (i, &b) in chunk.iter().enumerate() {
                if b == NEWLINE {
                    newline_seen = true;
                } else if newline_seen {
                    // Distance from the end of this window back to the byte
                    return ControlFlow::Break(chunk.len() - i);
                }
            }
            ControlFlow::Continue(())
        })?;

        match back {
            Some(back) => {
                self.rewind(back)?;
                Ok(())
            }
            None => {
                tracing::trace!(start, "no record after cursor");
                self.seek(SeekFrom::Start(start))?;
                Err(FileError::LineNotFound)
            }
        }
    }

    /// Move to the start of the record before the one under the cursor
    ///
    /// Scanning backward, the first delimiter met terminates the record just
    /// behind the cursor; the second one terminates the record before that,
    /// so the target starts right after it. With fewer than two delimiters
    /// behind the cursor there is no earlier record and the cursor goes to
    /// file start.
    pub(crate) fn prev_line(&mut self) -> Result<(), FileError> {
        let mut newlines = 0;

        let back = self.scan_backward(|chunk| {
            chunk.reverse();
            for (i, &b) in chunk.iter().enumerate() {
                if b != NEWLINE {
                    continue;
                }
                newlines += 1;
                if newlines == 2 {
                    return ControlFlow::Break(i);
                }
            }
            ControlFlow::Continue(())
        })?;

        match back {
            Some(back) => self.rewind(back)?,
            None => self.seek(SeekFrom::Start(0))?,
        };
        Ok(())
    }

    /// Move to the start of record `n` (0-indexed)
    ///
    /// There is no index: this reads `n + 1` records from file start and
    /// steps back one, so cost grows linearly with `n`. Fails with
    /// `LineNotFound`, cursor unchanged, when fewer than `n + 1` records
    /// exist.
    pub(crate) fn seek_to_line(&mut self, n: u64, scratch: &mut Vec<u8>) -> Result<(), FileError> {
        let start = self.position()?;
        self.seek(SeekFrom::Start(0))?;

        for _ in 0..=n {
            if !self.read_line(scratch)? {
                tracing::trace!(line = n, "file has fewer records than requested");
                self.seek(SeekFrom::Start(start))?;
                return Err(FileError::LineNotFound);
            }
        }

        self.prev_line()
    }
}

#[cfg(test)]
#[path = "navigator_tests.rs"]
mod tests;
