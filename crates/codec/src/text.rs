// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text-safe base64 transform
//!
//! Output never contains a newline byte, so placing this transform first in
//! a chain (closest to storage) makes any encoded payload safe to store as a
//! single line.

use crate::transform::{BoxReader, BoxWriter, Closed, LayerWriter, Transform};
use base64::engine::general_purpose::{GeneralPurpose, STANDARD};
use base64::read::DecoderReader;
use base64::write::EncoderWriter;
use std::io::{self, Write};

static ENGINE: GeneralPurpose = STANDARD;

/// Standard-alphabet base64 with padding
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64;

impl Transform for Base64 {
    fn name(&self) -> &'static str {
        "encoding/base64"
    }

    fn writer<'a>(&self, inner: BoxWriter<'a>) -> io::Result<BoxWriter<'a>> {
        Ok(Box::new(Base64Writer(EncoderWriter::new(inner, &ENGINE))))
    }

    fn reader<'a>(&self, inner: BoxReader<'a>) -> io::Result<BoxReader<'a>> {
        Ok(Box::new(DecoderReader::new(inner, &ENGINE)))
    }
}

struct Base64Writer<'a>(EncoderWriter<'static, GeneralPurpose, BoxWriter<'a>>);

impl Write for Base64Writer<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> LayerWriter<'a> for Base64Writer<'a> {
    fn close(self: Box<Self>) -> Closed<'a> {
        let Base64Writer(mut encoder) = *self;
        // finish() leaves the inner writer in place when the padding write
        // fails, so it can still be reclaimed
        match encoder.finish() {
            Ok(inner) => Closed {
                result: Ok(()),
                inner: Some(inner),
            },
            Err(e) => Closed {
                result: Err(e),
                inner: Some(encoder.into_inner()),
            },
        }
    }
}
