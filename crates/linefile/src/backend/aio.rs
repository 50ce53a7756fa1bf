// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asynchronous-I/O backend driven by a private tokio runtime
//!
//! Each call on a handle is submitted to the backend's runtime and the
//! caller blocks until it completes, so the capability surface stays
//! synchronous. Handles must not be used from inside another tokio runtime's
//! async context.

use super::{Backend, Handle, AIO};
use std::fs::OpenOptions;
use std::io::{self, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::runtime::{Builder, Runtime};

/// Opens `tokio::fs::File` handles on a single-worker runtime
///
/// Cloning shares the runtime, so many files can ride on one worker.
#[derive(Clone)]
pub struct AioBackend {
    runtime: Arc<Runtime>,
}

impl AioBackend {
    pub fn new() -> io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("linefile-aio")
            .enable_all()
            .build()?;
        tracing::debug!("started aio backend runtime");
        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }
}

impl std::fmt::Debug for AioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AioBackend").finish_non_exhaustive()
    }
}

impl Backend for AioBackend {
    fn name(&self) -> &'static str {
        AIO
    }

    fn open(&self, path: &Path, options: &OpenOptions) -> io::Result<Box<dyn Handle>> {
        let options = tokio::fs::OpenOptions::from(options.clone());
        let file = self.runtime.block_on(options.open(path))?;
        Ok(Box::new(AioHandle {
            file,
            runtime: Arc::clone(&self.runtime),
        }))
    }
}

struct AioHandle {
    file: tokio::fs::File,
    runtime: Arc<Runtime>,
}

impl Handle for AioHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.runtime.block_on(self.file.seek(pos))
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.runtime.block_on(self.file.read(buf))
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = &mut self.file;
        self.runtime.block_on(async move {
            // tokio buffers file writes internally; wait for the bytes to
            // reach the OS so later seeks and reads observe them
            file.write_all(buf).await?;
            file.flush().await?;
            Ok::<_, io::Error>(buf.len())
        })
    }

    fn sync(&mut self) -> io::Result<()> {
        self.runtime.block_on(self.file.sync_all())
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        let AioHandle { mut file, runtime } = *self;
        runtime.block_on(async move { file.flush().await })
    }
}
