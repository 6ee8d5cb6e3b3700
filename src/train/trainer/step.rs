//! Training step operations

use super::core::Trainer;
use crate::optim::clip_grad_norm;
use crate::train::{Batch, TrainError};

impl Trainer {
    /// Perform a single training step
    ///
    /// Zeroes gradients, runs forward and backward on the device, clips and
    /// applies one optimizer step.
    ///
    /// # Errors
    ///
    /// [`TrainError::Device`] if the step's buffers do not fit in device
    /// memory. Parameters are untouched in that case.
    pub fn train_step(&mut self, batch: &Batch) -> Result<f32, TrainError> {
        self.optimizer.zero_grad(&mut self.params);
        let loss = self.accumulate_gradients(batch)?;
        self.apply_gradients();
        self.metrics.increment_step();
        Ok(loss)
    }

    /// Forward and backward pass without an optimizer step
    ///
    /// Gradients accumulate across calls until the next zero_grad.
    pub(crate) fn accumulate_gradients(&mut self, batch: &Batch) -> Result<f32, TrainError> {
        let buffer_bytes = self.step_memory_bytes(batch.size()) / 2;

        let activations = self.device.allocate(buffer_bytes)?;
        // On failure the activation buffer stays live until the pool is reclaimed
        let gradients = self.device.allocate(buffer_bytes)?;

        let loss = self.model.loss_and_backward(&mut self.params, batch);

        self.device.free(gradients)?;
        self.device.free(activations)?;
        loss
    }

    /// Clip and apply accumulated gradients
    pub(crate) fn apply_gradients(&mut self) {
        if let Some(max_norm) = self.config.max_grad_norm {
            clip_grad_norm(&mut self.params, max_norm);
        }
        self.optimizer.step(&mut self.params);
    }
}
