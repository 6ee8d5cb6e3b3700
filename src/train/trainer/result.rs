//! Training result types

use crate::tune::ScaleResult;

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainResult {
    /// Final epoch reached
    pub final_epoch: usize,
    /// Final training loss
    pub final_loss: f32,
    /// Best loss achieved
    pub best_loss: f32,
    /// Whether a callback stopped training early
    pub stopped_early: bool,
    /// Total training time in seconds
    pub elapsed_secs: f64,
    /// Batch size training ran with
    pub batch_size: usize,
    /// Outcome of the batch-size search, when auto-scaling was enabled
    pub scale: Option<ScaleResult>,
}
