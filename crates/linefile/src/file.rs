// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The line file orchestrator
//!
//! A [`File`] owns one capability handle and one buffered writer while open,
//! and a scan window for its whole life. A single non-reentrant lock
//! serializes every operation on an instance, so callbacks handed to
//! [`File::read_line`] and [`File::read_lines`] must not call back into the
//! same instance.

use crate::backend::{self, Backend, HandleIo};
use crate::error::FileError;
use crate::options::FileOptions;
use crate::pool::BufferPool;
use crate::scanner::{Scanner, NEWLINE, WINDOW};
use linefile_codec::{decode, encode, Chain};
use std::fmt;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Creation sequence; orders lock acquisition when two files are involved
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A flat file of newline-delimited records
pub struct File {
    id: u64,
    location: PathBuf,
    sync_on_close: bool,
    backend: Arc<dyn Backend>,
    pool: Arc<BufferPool>,
    state: Mutex<State>,
}

struct State {
    window: [u8; WINDOW],
    open: Option<OpenFile>,
}

struct OpenFile {
    /// Buffered writes; reads and seeks go to the handle underneath
    writer: BufWriter<HandleIo>,
}

impl File {
    /// Create a file from options, opening it unless `no_open` is set
    pub fn new(options: FileOptions) -> Result<Self, FileError> {
        options.validate()?;
        let backend = options.build_backend()?;
        Self::assemble(options, backend, Arc::new(BufferPool::default()))
    }

    /// Create a file with an injected backend and scratch pool
    ///
    /// The backend selector in `options` is still validated but otherwise
    /// ignored.
    pub fn with_parts(
        options: FileOptions,
        backend: Arc<dyn Backend>,
        pool: Arc<BufferPool>,
    ) -> Result<Self, FileError> {
        options.validate()?;
        Self::assemble(options, backend, pool)
    }

    fn assemble(
        options: FileOptions,
        backend: Arc<dyn Backend>,
        pool: Arc<BufferPool>,
    ) -> Result<Self, FileError> {
        let file = Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            location: options.location(),
            sync_on_close: options.sync_on_close,
            backend,
            pool,
            state: Mutex::new(State {
                window: [0; WINDOW],
                open: None,
            }),
        };

        if !options.no_open {
            file.open()?;
        }
        Ok(file)
    }

    /// Path of the backing file
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn is_open(&self) -> bool {
        self.lock().open.is_some()
    }

    /// Open a closed file
    ///
    /// The file is created if missing. Writes always land at end-of-data;
    /// the cursor starts at file start.
    pub fn open(&self) -> Result<(), FileError> {
        let mut state = self.lock();
        if state.open.is_some() {
            return Err(FileError::IsOpen);
        }

        let handle = self
            .backend
            .open(&self.location, &backend::line_file_options())?;
        state.open = Some(OpenFile {
            writer: BufWriter::new(HandleIo::new(handle)),
        });

        tracing::debug!(
            location = %self.location.display(),
            backend = self.backend.name(),
            "opened line file"
        );
        Ok(())
    }

    /// Drain buffered writes and release the handle
    ///
    /// Syncs to disk first only when `sync_on_close` was set. If draining
    /// fails the file stays open so the close can be retried.
    pub fn close(&self) -> Result<(), FileError> {
        let mut state = self.lock();
        let Some(mut open) = state.open.take() else {
            return Err(FileError::IsClosed);
        };

        if let Err(e) = open.drain(self.sync_on_close) {
            state.open = Some(open);
            return Err(e.into());
        }

        let (io, _) = open.writer.into_parts();
        io.close()?;

        tracing::debug!(location = %self.location.display(), "closed line file");
        Ok(())
    }

    /// Current cursor offset in bytes
    pub fn position(&self) -> Result<u64, FileError> {
        self.with_scanner(|scanner| Ok(scanner.position()?))
    }

    pub fn seek_to_start(&self) -> Result<(), FileError> {
        self.with_scanner(|scanner| {
            scanner.seek(SeekFrom::Start(0))?;
            Ok(())
        })
    }

    pub fn seek_to_end(&self) -> Result<(), FileError> {
        self.with_scanner(|scanner| {
            scanner.seek(SeekFrom::End(0))?;
            Ok(())
        })
    }

    /// Move the cursor to the start of the next record
    ///
    /// Fails with `LineNotFound`, cursor unchanged, from the last record.
    pub fn next_line(&self) -> Result<(), FileError> {
        self.with_scanner(|scanner| scanner.next_line())
    }

    /// Move the cursor to the start of the previous record, or to file start
    /// when there is none
    pub fn prev_line(&self) -> Result<(), FileError> {
        self.with_scanner(|scanner| scanner.prev_line())
    }

    /// Move the cursor to the start of record `n` (0-indexed)
    ///
    /// Not constant time: with no index this reads every record up to and
    /// including `n`. Fails with `LineNotFound`, cursor unchanged, when the
    /// file holds `n` records or fewer.
    pub fn seek_to_line(&self, n: u64) -> Result<(), FileError> {
        self.with_scanner(|scanner| {
            let mut scratch = self.pool.checkout();
            scanner.seek_to_line(n, &mut scratch)
        })
    }

    /// Read the record at the cursor and hand it to `visit`
    ///
    /// Returns `Ok(None)` at end-of-data, including when only an
    /// unterminated tail remains; `visit` is not called then. The slice is
    /// pooled scratch space valid only for the duration of the call.
    pub fn read_line<T>(&self, visit: impl FnOnce(&[u8]) -> T) -> Result<Option<T>, FileError> {
        self.with_scanner(|scanner| {
            let mut line = self.pool.checkout();
            if scanner.read_line(&mut line)? {
                Ok(Some(visit(&line)))
            } else {
                Ok(None)
            }
        })
    }

    /// Read records from the cursor until `visit` breaks or data runs out
    ///
    /// Reaching end-of-data is the normal way for this to finish and is not
    /// reported.
    pub fn read_lines(&self, mut visit: impl FnMut(&[u8]) -> ControlFlow<()>) -> Result<(), FileError> {
        self.with_scanner(|scanner| {
            loop {
                let mut line = self.pool.checkout();
                if !scanner.read_line(&mut line)? {
                    return Ok(());
                }
                if visit(&line).is_break() {
                    return Ok(());
                }
            }
        })
    }

    /// Buffer `payload` followed by one delimiter
    ///
    /// Nothing is visible to reads until [`File::flush`].
    pub fn write_line(&self, payload: &[u8]) -> Result<(), FileError> {
        let mut state = self.lock();
        let open = state.open.as_mut().ok_or(FileError::IsClosed)?;
        if payload.contains(&NEWLINE) {
            return Err(FileError::EmbeddedNewline);
        }

        open.writer.write_all(payload)?;
        // The delimiter never passes through a transform, so record
        // boundaries stay scannable whatever the payload encoding
        open.writer.write_all(&[NEWLINE])?;
        Ok(())
    }

    /// Encode `payload` through `chain` and write it as one record
    ///
    /// The stored form must be newline-free; put a text-safe transform
    /// first in the chain when other layers emit binary.
    pub fn write_encoded_line(&self, payload: &[u8], chain: &Chain) -> Result<(), FileError> {
        let stored = encode(payload, chain)?;
        self.write_line(&stored)
    }

    /// Read the record at the cursor and decode it through `chain`
    pub fn read_decoded_line(&self, chain: &Chain) -> Result<Option<Vec<u8>>, FileError> {
        let stored = self.read_line(<[u8]>::to_vec)?;
        Ok(stored.map(|stored| decode(&stored, chain)).transpose()?)
    }

    /// Drain buffered writes, then sync the handle to disk
    pub fn flush(&self) -> Result<(), FileError> {
        let mut state = self.lock();
        let open = state.open.as_mut().ok_or(FileError::IsClosed)?;
        open.drain(true)?;
        Ok(())
    }

    /// Copy every byte from `other`'s cursor to its end onto the end of
    /// this file, returning the number of bytes copied
    ///
    /// Both instances are locked for the duration, lower creation sequence
    /// first, so opposite appends running concurrently cannot deadlock.
    /// Buffered writes on this file are drained before and after the copy;
    /// nothing is synced. The source length is fixed before copying, so two
    /// instances on one location append a single copy of the tail.
    pub fn append(&self, other: &File) -> Result<u64, FileError> {
        if self.id == other.id {
            return Err(FileError::SelfAppend);
        }

        let (mut dst, mut src) = if self.id < other.id {
            let dst = self.lock();
            let src = other.lock();
            (dst, src)
        } else {
            let src = other.lock();
            let dst = self.lock();
            (dst, src)
        };
        let dst = dst.open.as_mut().ok_or(FileError::IsClosed)?;
        let src = src.open.as_mut().ok_or(FileError::IsClosed)?;

        dst.writer.flush()?;
        dst.writer.get_mut().seek(SeekFrom::End(0))?;

        let src = src.writer.get_mut();
        let start = src.stream_position()?;
        let end = src.seek(SeekFrom::End(0))?;
        src.seek(SeekFrom::Start(start))?;
        let mut tail = src.take(end.saturating_sub(start));

        let copied = io::copy(&mut tail, &mut dst.writer)?;
        dst.writer.flush()?;

        tracing::debug!(
            location = %self.location.display(),
            source = %other.location.display(),
            bytes = copied,
            "appended line file"
        );
        Ok(copied)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_scanner<T>(
        &self,
        run: impl FnOnce(&mut Scanner<'_, HandleIo>) -> Result<T, FileError>,
    ) -> Result<T, FileError> {
        let mut state = self.lock();
        let State { window, open } = &mut *state;
        let open = open.as_mut().ok_or(FileError::IsClosed)?;
        let mut scanner = Scanner::new(open.writer.get_mut(), window);
        run(&mut scanner)
    }
}

impl OpenFile {
    fn drain(&mut self, sync: bool) -> io::Result<()> {
        self.writer.flush()?;
        if sync {
            self.writer.get_mut().sync()?;
        }
        Ok(())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("id", &self.id)
            .field("location", &self.location)
            .field("backend", &self.backend.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
