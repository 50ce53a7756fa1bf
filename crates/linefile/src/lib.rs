// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! linefile: a flat file treated as newline-delimited records
//!
//! This crate provides:
//! - [`File`]: append, sequential read, and navigation by line with no index
//! - Pluggable capability backends ([`Backend`] / [`Handle`]), synchronous
//!   by default with a tokio-driven alternative
//! - An explicit scratch [`BufferPool`] shared by line reads
//!
//! ## Architecture
//!
//! ```text
//! File ─┬─ BufWriter ─┐
//!       │             ├─ HandleIo ── Box<dyn Handle> ── disk
//!       └─ Scanner ───┘   (32-byte window: next/prev/seek/read line)
//! ```
//!
//! ## Consistency
//!
//! Writes are buffered and stay invisible to reads and navigation on the
//! same instance until [`File::flush`] or [`File::close`].

pub mod backend;
pub mod error;
pub mod file;
pub mod options;
pub mod pool;

mod navigator;
mod reader;
mod scanner;

pub use backend::{AioBackend, Backend, Handle, SyncBackend};
pub use error::FileError;
pub use file::File;
pub use options::FileOptions;
pub use pool::BufferPool;

pub use linefile_codec as codec;
