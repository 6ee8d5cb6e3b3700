//! Accelerator memory model
//!
//! Training steps allocate activation and gradient buffers from a fixed-size
//! pool. Requests beyond the pool capacity fail with
//! [`DeviceError::OutOfMemory`], which is the signal the batch-size scaler
//! probes for.

mod memory;

pub use memory::{Allocation, DeviceMemory, MemoryStats};

/// Device memory errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error(
        "Out of memory: tried to allocate {requested} bytes ({available} bytes free of {capacity})"
    )]
    OutOfMemory { requested: usize, available: usize, capacity: usize },

    #[error("Unknown allocation id: {0}")]
    UnknownAllocation(u64),
}

impl DeviceError {
    /// Whether this error is a resource-exhaustion failure
    pub fn is_oom(&self) -> bool {
        matches!(self, DeviceError::OutOfMemory { .. })
    }
}
