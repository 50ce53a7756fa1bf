// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scratch buffer pool for line reads
//!
//! Buffers are checked out before a read, handed to the caller's callback
//! as a borrowed slice, and returned when the checkout guard drops. Contents
//! are undefined on reuse.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

/// Initial capacity of freshly allocated buffers
const BUFFER_CAPACITY: usize = 32;
/// Buffers retained when none are requested
const DEFAULT_RETAINED: usize = 8;
/// Larger buffers are dropped instead of returned, so one huge record does
/// not pin its allocation for the pool's lifetime
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// A bounded pool of reusable byte buffers
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    max_retained: usize,
}

impl BufferPool {
    /// Create a pool keeping at most `max_retained` idle buffers
    pub fn new(max_retained: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_retained,
        }
    }

    /// Take a cleared buffer, allocating if none is idle
    pub fn checkout(&self) -> PooledBuffer<'_> {
        let buf = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(BUFFER_CAPACITY));
        PooledBuffer { pool: self, buf }
    }

    /// Number of idle buffers
    pub fn idle(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn put(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < self.max_retained {
            free.push(buf);
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_RETAINED)
    }
}

/// A checked-out buffer, returned to its pool on drop
pub struct PooledBuffer<'p> {
    pool: &'p BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}
