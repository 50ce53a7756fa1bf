// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Codec error types

use std::fmt;
use std::io;
use thiserror::Error;

/// Errors that can occur while composing or driving a transform chain
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid key or iv length")]
    InvalidKey,
    #[error("transform {transform} failed to wrap stream: {source}")]
    Wrap {
        transform: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{}", LayerErrors(.0))]
    Layers(Vec<LayerError>),
}

/// A failure attributed to one layer of a chain
#[derive(Debug, Error)]
#[error("{layer}: {source}")]
pub struct LayerError {
    pub layer: &'static str,
    #[source]
    pub source: io::Error,
}

struct LayerErrors<'a>(&'a [LayerError]);

impl fmt::Display for LayerErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} layer error(s)", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, err)?;
        }
        Ok(())
    }
}

impl CodecError {
    /// Collapse collected layer failures into a single result
    pub(crate) fn from_layers(errors: Vec<LayerError>) -> Result<(), CodecError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CodecError::Layers(errors))
        }
    }
}
