//! Validation error types

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid sample count: {0} (must be > 0)")]
    InvalidSamples(usize),

    #[error("Invalid feature count: {0} (must be > 0)")]
    InvalidFeatures(usize),

    #[error("Invalid device capacity: {0} bytes (must be > 0)")]
    InvalidDeviceCapacity(usize),

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f32),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("No batch size configured: set training.batch_size or training.hparams.{0}")]
    MissingBatchSize(String),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid momentum: {0} (must be in [0.0, 1.0))")]
    InvalidMomentum(f32),

    #[error("Invalid weight decay: {0} (must be >= 0.0)")]
    InvalidWeightDecay(f32),

    #[error("Invalid gradient clip value: {0} (must be > 0.0)")]
    InvalidGradClip(f32),

    #[error("Invalid gradient accumulation steps: {0} (must be > 0)")]
    InvalidAccumulationSteps(usize),

    #[error("Invalid scale config: {0}")]
    InvalidScale(String),
}
