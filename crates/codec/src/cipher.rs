// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keyed encryption transform (AES-256 in counter mode)
//!
//! CTR mode turns AES into a stream cipher, so ciphertext has exactly the
//! length of the plaintext and both directions are a keystream XOR. Every
//! wrapped stream starts from the configured IV.

use crate::error::CodecError;
use crate::transform::{BoxReader, BoxWriter, Closed, LayerWriter, Transform};
use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use std::fmt;
use std::io::{self, Read, Write};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Required key length in bytes
pub const KEY_LEN: usize = 32;
/// Required IV length in bytes
pub const IV_LEN: usize = 16;

/// AES-256-CTR encryption keyed at construction
#[derive(Clone)]
pub struct Cipher {
    /// Keystream positioned at the start; cloned for each stream
    initial: Aes256Ctr,
}

impl Cipher {
    /// Create a cipher from a 32-byte key and a 16-byte IV
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, CodecError> {
        let initial = Aes256Ctr::new_from_slices(key, iv).map_err(|_| CodecError::InvalidKey)?;
        Ok(Self { initial })
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher").finish_non_exhaustive()
    }
}

impl Transform for Cipher {
    fn name(&self) -> &'static str {
        "encryption/aes-ctr"
    }

    fn writer<'a>(&self, inner: BoxWriter<'a>) -> io::Result<BoxWriter<'a>> {
        Ok(Box::new(CipherWriter {
            keystream: self.initial.clone(),
            inner,
            scratch: Vec::new(),
        }))
    }

    fn reader<'a>(&self, inner: BoxReader<'a>) -> io::Result<BoxReader<'a>> {
        Ok(Box::new(CipherReader {
            keystream: self.initial.clone(),
            inner,
        }))
    }
}

struct CipherWriter<'a> {
    keystream: Aes256Ctr,
    inner: BoxWriter<'a>,
    scratch: Vec<u8>,
}

impl Write for CipherWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.scratch.clear();
        self.scratch.extend_from_slice(buf);
        self.keystream.apply_keystream(&mut self.scratch);
        // The keystream has advanced by buf.len(); a short write here would
        // desynchronize it, so the whole chunk goes down or the call fails.
        self.inner.write_all(&self.scratch)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<'a> LayerWriter<'a> for CipherWriter<'a> {
    fn close(self: Box<Self>) -> Closed<'a> {
        let mut this = *self;
        let result = this.inner.flush();
        Closed {
            result,
            inner: Some(this.inner),
        }
    }
}

struct CipherReader<'a> {
    keystream: Aes256Ctr,
    inner: BoxReader<'a>,
}

impl Read for CipherReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.keystream.apply_keystream(&mut buf[..n]);
        Ok(n)
    }
}
