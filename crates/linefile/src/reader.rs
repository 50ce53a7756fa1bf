// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-record reads

use crate::scanner::{Scanner, NEWLINE};
use std::io::{self, Read, Seek};
use std::ops::ControlFlow;

impl<S: Read + Seek> Scanner<'_, S> {
    /// Read the record at the cursor into `line`, delimiter excluded
    ///
    /// On success the cursor sits just past the delimiter. Returns `false`
    /// when end-of-data arrives before a delimiter; the cursor is then put
    /// back where the read began and `line` is left empty.
    pub(crate) fn read_line(&mut self, line: &mut Vec<u8>) -> io::Result<bool> {
        line.clear();
        let over_read = self.scan_forward(|chunk| match chunk.iter().position(|&b| b == NEWLINE) {
            Some(idx) => {
                line.extend_from_slice(&chunk[..idx]);
                ControlFlow::Break(chunk.len() - idx - 1)
            }
            None => {
                line.extend_from_slice(chunk);
                ControlFlow::Continue(())
            }
        })?;

        match over_read {
            Some(over_read) => {
                if over_read > 0 {
                    self.rewind(over_read)?;
                }
                Ok(true)
            }
            None => {
                if !line.is_empty() {
                    self.rewind(line.len())?;
                    line.clear();
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
