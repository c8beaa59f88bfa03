//! Allocation strategies for basic-image pixel buffers.
//!
//! On desktop targets buffers come straight from the heap. On small targets a
//! fixed set of frame-sized slots is reserved once and handed out on request,
//! so image creation never fragments memory. Both sit behind
//! [`PixelAllocator`] and the image API is the same for either.

use std::sync::Mutex;

use crate::Error;

pub trait PixelAllocator {
    /// Returns a zeroed buffer of exactly `len` bytes.
    fn allocate(&self, len: usize) -> Result<Vec<u8>, Error>;

    /// Takes back a buffer previously returned by [`PixelAllocator::allocate`].
    fn release(&self, buf: Vec<u8>);
}

/// Fallible global-heap allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl PixelAllocator for HeapAllocator {
    fn allocate(&self, len: usize) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| Error::AllocationFailed { bytes: len })?;
        buf.resize(len, 0);
        Ok(buf)
    }

    fn release(&self, buf: Vec<u8>) {
        drop(buf);
    }
}

/// Fixed pool of equally sized slots, reserved up front.
#[derive(Debug)]
pub struct PoolAllocator {
    slots: usize,
    slot_bytes: usize,
    free: Mutex<Vec<Vec<u8>>>,
}

impl PoolAllocator {
    pub fn new(slots: usize, slot_bytes: usize) -> Result<Self, Error> {
        let mut free = Vec::with_capacity(slots);
        for _ in 0..slots {
            free.push(HeapAllocator.allocate(slot_bytes)?);
        }

        Ok(Self {
            slots,
            slot_bytes,
            free: Mutex::new(free),
        })
    }

    pub fn slot_bytes(&self) -> usize {
        self.slot_bytes
    }

    pub fn available(&self) -> usize {
        self.free.lock().map(|f| f.len()).unwrap_or(0)
    }
}

impl PixelAllocator for PoolAllocator {
    fn allocate(&self, len: usize) -> Result<Vec<u8>, Error> {
        if len > self.slot_bytes {
            log::warn!(
                "pool slot holds {} bytes, {} requested",
                self.slot_bytes,
                len
            );
            return Err(Error::AllocationFailed { bytes: len });
        }

        let mut free = self
            .free
            .lock()
            .map_err(|_| Error::AllocationFailed { bytes: len })?;
        let Some(mut buf) = free.pop() else {
            log::debug!("pixel pool exhausted");
            return Err(Error::AllocationFailed { bytes: len });
        };

        buf.clear();
        buf.resize(len, 0);
        Ok(buf)
    }

    fn release(&self, buf: Vec<u8>) {
        // Undersized buffers and releases beyond the slot count are dropped,
        // so the pool never holds more than `slots` buffers.
        if buf.capacity() < self.slot_bytes {
            return;
        }
        if let Ok(mut free) = self.free.lock()
            && free.len() < self.slots
        {
            free.push(buf);
        }
    }
}
