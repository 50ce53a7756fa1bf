// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered transform chains and the stream stacks they compose

use crate::error::{CodecError, LayerError};
use crate::transform::{BoxReader, BoxWriter, Sink, Transform};
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::Arc;

/// Name reported for the raw sink under a writer stack
const SINK: &str = "sink";

/// An ordered list of transforms
///
/// Index 0 sits closest to storage. Decoding must use the same list,
/// unmodified, that was used for encoding.
#[derive(Clone, Default)]
pub struct Chain {
    transforms: Vec<Arc<dyn Transform>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transform as the new outermost layer
    pub fn with(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Arc::new(transform));
        self
    }

    /// Append a shared transform as the new outermost layer
    pub fn push(&mut self, transform: Arc<dyn Transform>) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Transform names, innermost first
    pub fn names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Compose a writer stack over `sink`
    ///
    /// The first transform wraps `sink` directly; each later one wraps the
    /// stack built so far. Bytes written to the result enter the last
    /// transform first. If a transform refuses to wrap, the layers built so
    /// far are dropped unclosed and the refusal comes back as
    /// [`CodecError::Wrap`].
    pub fn writer<'a, W: Write + 'a>(&self, sink: W) -> Result<ChainWriter<'a>, CodecError> {
        let mut layer: BoxWriter<'a> = Box::new(Sink(sink));
        let mut names = vec![SINK];
        for transform in &self.transforms {
            layer = transform.writer(layer).map_err(|source| CodecError::Wrap {
                transform: transform.name(),
                source,
            })?;
            names.push(transform.name());
        }
        names.reverse();
        Ok(ChainWriter {
            outer: layer,
            names,
        })
    }

    /// Compose a reader stack over `source`
    ///
    /// Mirrors [`Chain::writer`]: the first transform unwraps `source`
    /// directly, and decoded bytes are read from the last one.
    pub fn reader<'a, R: Read + 'a>(&self, source: R) -> Result<ChainReader<'a>, CodecError> {
        let mut layer: BoxReader<'a> = Box::new(source);
        for transform in &self.transforms {
            layer = transform
                .reader(layer)
                .map_err(|source| CodecError::Wrap {
                    transform: transform.name(),
                    source,
                })?;
        }
        Ok(ChainReader { outer: layer })
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// A composed writer stack
///
/// Call [`ChainWriter::close`] to finish every layer; dropping the stack
/// instead leaves trailers to each layer's best-effort drop behaviour.
pub struct ChainWriter<'a> {
    outer: BoxWriter<'a>,
    /// Layer names, outermost first, ending with the sink
    names: Vec<&'static str>,
}

impl ChainWriter<'_> {
    /// Name of the layer that receives written bytes
    pub fn outermost(&self) -> &'static str {
        self.names.first().copied().unwrap_or(SINK)
    }

    /// Close every layer, outermost first
    ///
    /// A failing layer does not stop the walk: its inner layer is still
    /// closed, and every failure is reported together.
    pub fn close(self) -> Result<(), CodecError> {
        CodecError::from_layers(self.close_all())
    }

    pub(crate) fn close_all(self) -> Vec<LayerError> {
        let ChainWriter { outer, names } = self;
        let mut errors = Vec::new();
        let mut names = names.into_iter();
        let mut next = Some(outer);
        while let Some(layer) = next {
            let closed = layer.close();
            let layer = names.next().unwrap_or(SINK);
            if let Err(source) = closed.result {
                tracing::warn!(layer, error = %source, "transform layer failed to close");
                errors.push(LayerError { layer, source });
            }
            next = closed.inner;
        }
        errors
    }
}

impl Write for ChainWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.outer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.outer.flush()
    }
}

/// A composed reader stack yielding decoded bytes
pub struct ChainReader<'a> {
    outer: BoxReader<'a>,
}

impl Read for ChainReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.outer.read(buf)
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
