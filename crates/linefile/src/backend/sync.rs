// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Direct synchronous backend over `std::fs`

use super::{Backend, Handle, SYNC};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Opens plain `std::fs::File` handles
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncBackend;

impl Backend for SyncBackend {
    fn name(&self) -> &'static str {
        SYNC
    }

    fn open(&self, path: &Path, options: &OpenOptions) -> io::Result<Box<dyn Handle>> {
        Ok(Box::new(options.open(path)?))
    }
}

impl Handle for File {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(self, pos)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(self, buf)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        drop(self);
        Ok(())
    }
}
