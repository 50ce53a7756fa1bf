// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transform trait and the writer-layer contract

use std::io::{self, Read, Write};

/// A boxed writer layer
pub type BoxWriter<'a> = Box<dyn LayerWriter<'a> + 'a>;

/// A boxed reader layer
pub type BoxReader<'a> = Box<dyn Read + 'a>;

/// A named encode/decode pair
///
/// Implementations hold only fixed configuration. Any per-stream state
/// (compressor dictionaries, cipher counters) is created inside
/// [`Transform::writer`] / [`Transform::reader`], so one instance can be
/// shared across threads and reused for any number of streams.
pub trait Transform: Send + Sync {
    /// Stable name used in diagnostics
    fn name(&self) -> &'static str;

    /// Wrap `inner` so that bytes written to the result are encoded into it
    ///
    /// On failure `inner` is dropped without being closed.
    fn writer<'a>(&self, inner: BoxWriter<'a>) -> io::Result<BoxWriter<'a>>;

    /// Wrap `inner` so that reading from the result yields decoded bytes
    fn reader<'a>(&self, inner: BoxReader<'a>) -> io::Result<BoxReader<'a>>;
}

/// A writer that belongs to a composed chain
///
/// Closing a layer finishes its own encoding (trailers, padding, flushes)
/// and hands back the layer it wraps, whether or not finishing succeeded.
/// That lets a chain close every layer even after one of them fails.
pub trait LayerWriter<'a>: Write {
    fn close(self: Box<Self>) -> Closed<'a>;
}

/// Outcome of closing one layer
pub struct Closed<'a> {
    pub result: io::Result<()>,
    /// The wrapped layer, `None` for the raw sink
    pub inner: Option<BoxWriter<'a>>,
}

/// Adapts a plain writer into the innermost layer of a chain
pub(crate) struct Sink<W>(pub(crate) W);

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a, W: Write + 'a> LayerWriter<'a> for Sink<W> {
    fn close(mut self: Box<Self>) -> Closed<'a> {
        Closed {
            result: self.0.flush(),
            inner: None,
        }
    }
}

/// Placeholder swapped into an encoder once its real inner layer has been
/// taken back during close
pub(crate) fn detached<'a>() -> BoxWriter<'a> {
    Box::new(Sink(io::sink()))
}
