// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gzip compression transform

use crate::transform::{detached, BoxReader, BoxWriter, Closed, LayerWriter, Transform};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Gzip compression
#[derive(Debug, Clone, Copy)]
pub struct Gzip {
    level: Compression,
}

impl Gzip {
    /// Compression level from 0 (store) to 9 (best)
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for Gzip {
    fn default() -> Self {
        Self {
            level: Compression::default(),
        }
    }
}

impl Transform for Gzip {
    fn name(&self) -> &'static str {
        "compress/gzip"
    }

    fn writer<'a>(&self, inner: BoxWriter<'a>) -> io::Result<BoxWriter<'a>> {
        Ok(Box::new(GzipWriter(GzEncoder::new(inner, self.level))))
    }

    fn reader<'a>(&self, inner: BoxReader<'a>) -> io::Result<BoxReader<'a>> {
        Ok(Box::new(GzDecoder::new(inner)))
    }
}

struct GzipWriter<'a>(GzEncoder<BoxWriter<'a>>);

impl Write for GzipWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> LayerWriter<'a> for GzipWriter<'a> {
    fn close(mut self: Box<Self>) -> Closed<'a> {
        // Writes the remaining deflate blocks and the crc/size trailer
        let result = self.0.try_finish();
        let inner = std::mem::replace(self.0.get_mut(), detached());
        Closed {
            result,
            inner: Some(inner),
        }
    }
}
