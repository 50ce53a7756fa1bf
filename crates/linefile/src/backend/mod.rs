// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability handles and the backends that open them
//!
//! Everything above this module reaches storage through the five calls on
//! [`Handle`]. A [`Backend`] is the factory that maps a path and open
//! options to a handle; which one is used is decided once, at construction.
//!
//! Handles must follow ordinary file semantics: reading at end-of-data
//! returns `Ok(0)` instead of blocking.

mod aio;
mod sync;

pub use aio::AioBackend;
pub use sync::SyncBackend;

use crate::error::FileError;
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Selector for [`SyncBackend`]
pub const SYNC: &str = "sync";
/// Selector for [`AioBackend`]
pub const AIO: &str = "aio";

/// Minimal capability surface of an open file
pub trait Handle: Send {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Durably persist written bytes
    fn sync(&mut self) -> io::Result<()>;

    fn close(self: Box<Self>) -> io::Result<()>;
}

/// Factory for capability handles
pub trait Backend: Send + Sync {
    /// Selector name, for diagnostics
    fn name(&self) -> &'static str;

    fn open(&self, path: &Path, options: &OpenOptions) -> io::Result<Box<dyn Handle>>;
}

/// Fail with `InvalidBackend` unless `selector` names a known backend
pub(crate) fn check_selector(selector: &str) -> Result<(), FileError> {
    match selector {
        "" | SYNC | AIO => Ok(()),
        other => Err(FileError::InvalidBackend(other.to_string())),
    }
}

/// Build the backend named by `selector`
///
/// Every file selecting `aio` by name shares one backend, and so one
/// runtime.
pub(crate) fn resolve(selector: &str) -> Result<Arc<dyn Backend>, FileError> {
    check_selector(selector)?;
    match selector {
        AIO => {
            let backend: Arc<dyn Backend> = shared_aio()?;
            Ok(backend)
        }
        _ => Ok(Arc::new(SyncBackend)),
    }
}

/// The process-wide `aio` backend, started on first use
pub(crate) fn shared_aio() -> io::Result<Arc<AioBackend>> {
    static SHARED: OnceLock<Arc<AioBackend>> = OnceLock::new();
    if let Some(backend) = SHARED.get() {
        return Ok(Arc::clone(backend));
    }
    let started = Arc::new(AioBackend::new()?);
    Ok(Arc::clone(SHARED.get_or_init(|| started)))
}

/// Open options every line file uses: read/write, created on demand, all
/// writes landing at end-of-data
pub(crate) fn line_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).append(true).create(true);
    options
}

/// Adapts a handle to the std I/O traits so the scanner and `BufWriter`
/// can drive it
pub(crate) struct HandleIo(Box<dyn Handle>);

impl HandleIo {
    pub(crate) fn new(handle: Box<dyn Handle>) -> Self {
        Self(handle)
    }

    pub(crate) fn sync(&mut self) -> io::Result<()> {
        self.0.sync()
    }

    pub(crate) fn close(self) -> io::Result<()> {
        self.0.close()
    }
}

impl Read for HandleIo {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Write for HandleIo {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    /// Durability is a separate step; see [`HandleIo::sync`]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for HandleIo {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
