//! Training configuration and metrics tracking

use crate::tune::ScaleMode;

/// Training configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Samples per batch. `None` means the batch size lives in the trainer's hparams.
    pub batch_size: Option<usize>,
    /// Maximum gradient norm for clipping
    pub max_grad_norm: Option<f32>,
    /// Batches accumulated before each optimizer step
    pub gradient_accumulation_steps: usize,
    /// Reshuffle samples every epoch
    pub shuffle: bool,
    /// Drop the trailing partial batch
    pub drop_last: bool,
    /// Shuffle seed
    pub seed: u64,
    /// Run the batch-size scaler before the first epoch
    pub auto_scale_batch_size: Option<ScaleMode>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            batch_size: Some(32),
            max_grad_norm: Some(1.0),
            gradient_accumulation_steps: 1,
            shuffle: true,
            drop_last: false,
            seed: 42,
            auto_scale_batch_size: None,
        }
    }
}

impl TrainConfig {
    /// Create default config
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Read the batch size from hparams instead of the config
    pub fn without_batch_size(mut self) -> Self {
        self.batch_size = None;
        self
    }

    /// Set gradient clipping
    pub fn with_grad_clip(mut self, max_norm: f32) -> Self {
        self.max_grad_norm = Some(max_norm);
        self
    }

    /// Disable gradient clipping
    pub fn without_grad_clip(mut self) -> Self {
        self.max_grad_norm = None;
        self
    }

    pub fn with_gradient_accumulation(mut self, steps: usize) -> Self {
        self.gradient_accumulation_steps = steps.max(1);
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Scale the batch size with `mode` before training
    pub fn with_auto_scale(mut self, mode: ScaleMode) -> Self {
        self.auto_scale_batch_size = Some(mode);
        self
    }
}

/// Per-run training metrics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsTracker {
    /// Completed epochs
    pub epoch: usize,
    /// Optimizer-visible training steps
    pub steps: usize,
    /// Average loss per epoch
    pub losses: Vec<f32>,
    /// Learning rate per epoch
    pub learning_rates: Vec<f32>,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_step(&mut self) {
        self.steps += 1;
    }

    /// Record the end of an epoch
    pub fn record_epoch(&mut self, loss: f32, lr: f32) {
        self.losses.push(loss);
        self.learning_rates.push(lr);
        self.epoch += 1;
    }

    /// Lowest epoch loss so far
    pub fn best_loss(&self) -> Option<f32> {
        self.losses.iter().copied().reduce(f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = TrainConfig::new()
            .with_batch_size(8)
            .without_grad_clip()
            .with_gradient_accumulation(0)
            .with_auto_scale(ScaleMode::BinSearch);

        assert_eq!(config.batch_size, Some(8));
        assert!(config.max_grad_norm.is_none());
        assert_eq!(config.gradient_accumulation_steps, 1);
        assert_eq!(config.auto_scale_batch_size, Some(ScaleMode::BinSearch));
        assert_eq!(TrainConfig::new().without_batch_size().batch_size, None);
    }

    #[test]
    fn test_metrics_tracker() {
        let mut metrics = MetricsTracker::new();
        metrics.increment_step();
        metrics.increment_step();
        metrics.record_epoch(0.5, 0.01);
        metrics.record_epoch(0.25, 0.01);
        metrics.record_epoch(0.3, 0.01);

        assert_eq!(metrics.steps, 2);
        assert_eq!(metrics.epoch, 3);
        assert_eq!(metrics.best_loss(), Some(0.25));
        assert_eq!(MetricsTracker::new().best_loss(), None);
    }
}
