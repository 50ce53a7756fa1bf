// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! linefile-codec: layered encode/decode transforms
//!
//! This crate provides:
//! - The [`Transform`] trait: a named pair of writer/reader decorators
//! - [`Chain`]: an ordered list of transforms composed into nested streams
//! - Whole-buffer [`encode`] / [`decode`] helpers built on top of a chain
//! - Reference transforms for compression, encryption and base64
//!
//! ## Layer order
//!
//! ```text
//! encode:  payload → t_k → ... → t_1 → t_0 → sink
//! decode:  source → t_0 → t_1 → ... → t_k → payload
//! ```
//!
//! The same ordered list is used in both directions: whichever transform sat
//! closest to storage while writing is the first one undone while reading.

pub mod buffer;
pub mod chain;
pub mod cipher;
pub mod error;
pub mod gzip;
pub mod text;
pub mod transform;

pub use buffer::{decode, encode};
pub use chain::{Chain, ChainReader, ChainWriter};
pub use cipher::Cipher;
pub use error::{CodecError, LayerError};
pub use gzip::Gzip;
pub use text::Base64;
pub use transform::{BoxReader, BoxWriter, Closed, LayerWriter, Transform};
