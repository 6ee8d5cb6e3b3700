//! AdamW optimizer (Adam with decoupled Weight decay)

use super::optimizer::{OptimizerState, StateBuffers};
use super::Optimizer;
use crate::Tensor;
use ndarray::Array1;

const EXP_AVG: &str = "exp_avg";
const EXP_AVG_SQ: &str = "exp_avg_sq";

/// AdamW optimizer
///
/// AdamW decouples weight decay from the gradient-based update, applying it
/// directly to the parameters instead of adding it to the gradient.
///
/// AdamW: θ_t = (1 - lr * λ) * θ_{t-1} - lr_t * m_t / (√v_t + ε)
pub struct AdamW {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    weight_decay: f32,
    t: u64,
    m: Vec<Option<Array1<f32>>>, // First moment
    v: Vec<Option<Array1<f32>>>, // Second moment
}

impl AdamW {
    /// Create a new AdamW optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32, weight_decay: f32) -> Self {
        Self { lr, beta1, beta2, epsilon, weight_decay, t: 0, m: Vec::new(), v: Vec::new() }
    }

    /// Create AdamW with default parameters (weight_decay = 0.01)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-8, 0.01)
    }

    fn ensure_moments(&mut self, params: &[Tensor]) {
        if self.m.len() < params.len() {
            self.m.resize(params.len(), None);
            self.v.resize(params.len(), None);
        }
    }

    /// Get optimizer step counter.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.t
    }

    #[must_use]
    pub fn weight_decay(&self) -> f32 {
        self.weight_decay
    }
}

impl Optimizer for AdamW {
    fn step(&mut self, params: &mut [Tensor]) {
        self.ensure_moments(params);
        self.t += 1;

        // Bias correction folded into the step size
        let lr_t = self.lr
            * ((1.0 - self.beta2.powi(self.t as i32)).sqrt()
                / (1.0 - self.beta1.powi(self.t as i32)));

        for (i, param) in params.iter_mut().enumerate() {
            let Some(grad) = param.grad().cloned() else {
                continue;
            };

            // m_t = β1 * m_{t-1} + (1 - β1) * g
            let m_t = match &self.m[i] {
                Some(m) => m * self.beta1 + &grad * (1.0 - self.beta1),
                None => &grad * (1.0 - self.beta1),
            };

            // v_t = β2 * v_{t-1} + (1 - β2) * g²
            let grad_sq = &grad * &grad;
            let v_t = match &self.v[i] {
                Some(v) => v * self.beta2 + &grad_sq * (1.0 - self.beta2),
                None => &grad_sq * (1.0 - self.beta2),
            };

            let adaptive_update = &m_t / &(v_t.mapv(f32::sqrt) + self.epsilon) * lr_t;
            let decay = 1.0 - self.lr * self.weight_decay;
            let updated = param.data() * decay - &adaptive_update;
            *param.data_mut() = updated;

            self.m[i] = Some(m_t);
            self.v[i] = Some(v_t);
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
        buffers.insert(EXP_AVG.to_string(), self.m.clone());
        buffers.insert(EXP_AVG_SQ.to_string(), self.v.clone());
        OptimizerState { step: self.t, lr: self.lr, buffers }
    }

    fn load_state(&mut self, mut state: OptimizerState) {
        self.t = state.step;
        self.lr = state.lr;
        self.m = state.buffers.remove(EXP_AVG).unwrap_or_default();
        self.v = state.buffers.remove(EXP_AVG_SQ).unwrap_or_default();
    }

    fn name(&self) -> &'static str {
        "adamw"
    }
}
