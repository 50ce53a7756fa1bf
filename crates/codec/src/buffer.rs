// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-buffer encode/decode over an in-memory stream

use crate::chain::Chain;
use crate::error::{CodecError, LayerError};
use std::io::{Read, Write};

/// Push `payload` through every layer of `chain` and return the stored form
///
/// Every layer is closed even if writing or an earlier close failed; all
/// failures come back together as [`CodecError::Layers`].
pub fn encode(payload: &[u8], chain: &Chain) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    let mut writer = chain.writer(&mut out)?;

    let mut errors = Vec::new();
    if let Err(source) = writer.write_all(payload) {
        errors.push(LayerError {
            layer: writer.outermost(),
            source,
        });
    }
    errors.extend(writer.close_all());
    CodecError::from_layers(errors)?;

    Ok(out)
}

/// Pull `stored` back through `chain`, which must be the list that encoded it
pub fn decode(stored: &[u8], chain: &Chain) -> Result<Vec<u8>, CodecError> {
    let mut reader = chain.reader(stored)?;
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
