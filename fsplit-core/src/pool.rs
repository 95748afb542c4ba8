use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

/// Buffers kept on the free list; extra returns are dropped.
const MAX_POOLED: usize = 8;

/// Bounded free list of equally sized copy buffers. Reuse across chunks and
/// files is an allocation optimization, not a correctness requirement.
pub struct BufferPool {
    buf_size: usize,
    free: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    pub fn new(buf_size: usize) -> Self {
        BufferPool { buf_size, free: Mutex::new(Vec::new()) }
    }

    /// Borrow a buffer; it returns to the pool when the guard drops.
    pub fn get(&self) -> PooledBuf<'_> {
        let buf = self
            .free
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| vec![0u8; self.buf_size]);
        PooledBuf { pool: self, buf }
    }
}

pub struct PooledBuf<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuf<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl DerefMut for PooledBuf<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for PooledBuf<'_> {
    fn drop(&mut self) {
        let mut free = self.pool.free.lock().unwrap();
        if free.len() < MAX_POOLED {
            free.push(mem::take(&mut self.buf));
        }
    }
}
