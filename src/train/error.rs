//! Training errors

use crate::device::DeviceError;
use crate::tune::ScaleError;

/// Errors raised by the trainer
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("No batch size configured: set `batch_size` in the training config or hparams")]
    MissingBatchSize,

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Data loader was supplied externally and cannot be rebuilt")]
    ExternalLoader,

    #[error("No data loader available")]
    NoDataLoader,

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Shape mismatch: {0}")]
    Shape(String),

    #[error("Automatic batch size scaling failed: {0}")]
    Scale(#[from] ScaleError),
}

impl TrainError {
    /// Whether the failure came from running out of device memory
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, TrainError::Device(e) if e.is_oom())
    }
}
