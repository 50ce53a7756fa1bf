// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for line file operations

use linefile_codec::CodecError;
use thiserror::Error;

/// Errors that can occur in line file operations
///
/// Running out of records during a single-line read is not an error; see
/// [`crate::File::read_line`].
#[derive(Debug, Error)]
pub enum FileError {
    #[error("options are invalid: {0}")]
    InvalidOptions(&'static str),
    #[error("unrecognized backend: {0}")]
    InvalidBackend(String),
    #[error("cannot perform action on closed instance")]
    IsClosed,
    #[error("cannot open an instance which is already open")]
    IsOpen,
    #[error("line not found")]
    LineNotFound,
    #[error("record payload contains a newline byte")]
    EmbeddedNewline,
    #[error("cannot append an instance to itself")]
    SelfAppend,
    /// Backend failures pass through untouched
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
}
