//! Optimizer trait

use crate::Tensor;
use ndarray::Array1;
use std::collections::BTreeMap;

/// Per-parameter buffer slots, keyed by buffer name (e.g. `"velocity"`, `"exp_avg"`)
pub type StateBuffers = BTreeMap<String, Vec<Option<Array1<f32>>>>;

/// Snapshot of everything an optimizer step mutates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimizerState {
    /// Number of steps taken
    pub step: u64,
    /// Learning rate at snapshot time
    pub lr: f32,
    /// Named per-parameter buffers
    pub buffers: StateBuffers,
}

impl OptimizerState {
    /// Total bytes held by state buffers
    pub fn size_bytes(&self) -> usize {
        self.buffers
            .values()
            .flatten()
            .flatten()
            .map(|b| b.len() * std::mem::size_of::<f32>())
            .sum()
    }
}

/// Trait for optimization algorithms
pub trait Optimizer: Send {
    /// Perform a single optimization step
    fn step(&mut self, params: &mut [Tensor]);

    /// Zero out all gradients
    fn zero_grad(&mut self, params: &mut [Tensor]) {
        for param in params {
            param.zero_grad();
        }
    }

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);

    /// Copy out the mutable optimizer state
    fn state(&self) -> OptimizerState;

    /// Replace the mutable optimizer state
    fn load_state(&mut self, state: OptimizerState);

    /// Optimizer name for logging
    fn name(&self) -> &'static str;
}
