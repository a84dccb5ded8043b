//! Reusable scratch buffers for line rendering
//!
//! Buffers are handed out as [`PooledBuffer`] guards. A guard owns its
//! buffer exclusively and gives it back to the pool when dropped, so the
//! buffer is returned on every exit path of a render, including errors and
//! panics.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};

/// Initial capacity of freshly allocated buffers (4 KiB)
pub const DEFAULT_BUFFER_CAPACITY: usize = 4 << 10;

/// Number of idle buffers kept by default
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// Buffers that grew past this size are dropped instead of pooled
const MAX_RETAINED_CAPACITY: usize = 64 << 10;

/// Pool of reusable byte buffers.
///
/// Idle buffers live in a bounded lock-free channel. Acquisition never
/// blocks: an empty pool allocates a new buffer, a full pool drops the
/// returned one.
#[derive(Debug)]
pub struct BufferPool {
    sender: Sender<Vec<u8>>,
    receiver: Receiver<Vec<u8>>,
    buffer_capacity: usize,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Create a pool retaining at most `pool_capacity` idle buffers
    pub fn with_capacity(pool_capacity: usize) -> Self {
        let (sender, receiver) = bounded(pool_capacity.max(1));
        Self {
            sender,
            receiver,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Take a buffer from the pool, allocating when none is idle.
    ///
    /// The returned buffer is always empty. The second value reports whether
    /// the buffer was reused.
    pub fn acquire(&self) -> (PooledBuffer<'_>, bool) {
        let (buf, reused) = match self.receiver.try_recv() {
            Ok(buf) => (buf, true),
            Err(_) => (Vec::with_capacity(self.buffer_capacity), false),
        };
        (PooledBuffer { pool: self, buf }, reused)
    }

    /// Number of idle buffers currently held
    pub fn idle(&self) -> usize {
        self.receiver.len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        // A full pool just lets the buffer drop.
        let _ = self.sender.try_send(buf);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusively owned buffer on loan from a [`BufferPool`]
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
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
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
