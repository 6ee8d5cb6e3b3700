//! Caching device memory pool

use super::DeviceError;
use std::collections::BTreeMap;
use tracing::debug;

/// Handle to a live device allocation
///
/// Dropping a handle without passing it to [`DeviceMemory::free`] leaves the
/// bytes allocated until the next [`DeviceMemory::reclaim`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "allocations stay live until freed or reclaimed"]
pub struct Allocation {
    id: u64,
    bytes: usize,
}

impl Allocation {
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

/// Point-in-time memory usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStats {
    pub capacity: usize,
    pub persistent: usize,
    pub allocated: usize,
    pub cached: usize,
    pub peak: usize,
}

/// Fixed-capacity device memory pool
///
/// Persistent bytes (model parameters) are reserved up front and survive
/// [`reclaim`](Self::reclaim). Transient bytes are tracked per allocation.
/// Freed blocks go to a cache that later allocations draw from first; the
/// cache never blocks an allocation, it only shows up in [`MemoryStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceMemory {
    capacity: usize,
    persistent: usize,
    live: BTreeMap<u64, usize>,
    allocated: usize,
    cached: usize,
    peak: usize,
    next_id: u64,
}

impl DeviceMemory {
    /// Create a pool with `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            persistent: 0,
            live: BTreeMap::new(),
            allocated: 0,
            cached: 0,
            peak: 0,
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes not held by persistent or live transient allocations
    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.persistent + self.allocated)
    }

    /// Reserve bytes that live for the lifetime of the pool
    pub fn reserve_persistent(&mut self, bytes: usize) -> Result<(), DeviceError> {
        if bytes > self.available() {
            return Err(self.oom(bytes));
        }
        self.persistent += bytes;
        self.peak = self.peak.max(self.persistent + self.allocated);
        Ok(())
    }

    /// Allocate transient bytes
    pub fn allocate(&mut self, bytes: usize) -> Result<Allocation, DeviceError> {
        if bytes > self.available() {
            return Err(self.oom(bytes));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, bytes);
        self.allocated += bytes;
        self.cached = self.cached.saturating_sub(bytes);
        self.peak = self.peak.max(self.persistent + self.allocated);
        Ok(Allocation { id, bytes })
    }

    /// Return an allocation to the cache
    pub fn free(&mut self, allocation: Allocation) -> Result<(), DeviceError> {
        let bytes = self
            .live
            .remove(&allocation.id)
            .ok_or(DeviceError::UnknownAllocation(allocation.id))?;
        self.allocated -= bytes;
        self.cached += bytes;
        Ok(())
    }

    /// Drop cached blocks
    pub fn empty_cache(&mut self) {
        self.cached = 0;
    }

    /// Release every transient allocation and empty the cache
    ///
    /// Returns the number of bytes released from live allocations.
    pub fn reclaim(&mut self) -> usize {
        let released = self.allocated;
        if released > 0 {
            debug!(bytes = released, allocations = self.live.len(), "reclaiming device memory");
        }
        self.live.clear();
        self.allocated = 0;
        self.empty_cache();
        released
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            capacity: self.capacity,
            persistent: self.persistent,
            allocated: self.allocated,
            cached: self.cached,
            peak: self.peak,
        }
    }

    fn oom(&self, requested: usize) -> DeviceError {
        DeviceError::OutOfMemory { requested, available: self.available(), capacity: self.capacity }
    }
}
