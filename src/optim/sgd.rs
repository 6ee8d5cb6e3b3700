//! Stochastic Gradient Descent optimizer

use super::optimizer::{OptimizerState, StateBuffers};
use super::Optimizer;
use crate::Tensor;
use ndarray::Array1;

const VELOCITY: &str = "velocity";

/// SGD optimizer with optional momentum
pub struct SGD {
    lr: f32,
    momentum: f32,
    steps: u64,
    velocities: Vec<Option<Array1<f32>>>,
}

impl SGD {
    /// Create a new SGD optimizer
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self { lr, momentum, steps: 0, velocities: Vec::new() }
    }

    fn ensure_velocities(&mut self, params: &[Tensor]) {
        if self.velocities.len() < params.len() {
            self.velocities.resize(params.len(), None);
        }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [Tensor]) {
        self.ensure_velocities(params);
        self.steps += 1;

        for (i, param) in params.iter_mut().enumerate() {
            let Some(grad) = param.grad().cloned() else {
                continue;
            };

            if self.momentum > 0.0 {
                // v = momentum * v - lr * grad
                let velocity = match &self.velocities[i] {
                    Some(v) => v * self.momentum - &grad * self.lr,
                    None => &grad * (-self.lr),
                };
                *param.data_mut() += &velocity;
                self.velocities[i] = Some(velocity);
            } else {
                // param -= lr * grad
                *param.data_mut() -= &(grad * self.lr);
            }
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn state(&self) -> OptimizerState {
        let mut buffers = StateBuffers::new();
        buffers.insert(VELOCITY.to_string(), self.velocities.clone());
        OptimizerState { step: self.steps, lr: self.lr, buffers }
    }

    fn load_state(&mut self, mut state: OptimizerState) {
        self.steps = state.step;
        self.lr = state.lr;
        self.velocities = state.buffers.remove(VELOCITY).unwrap_or_default();
    }

    fn name(&self) -> &'static str {
        "sgd"
    }
}
