//! Optimizers for training

mod adamw;
mod clip;
mod optimizer;
mod sgd;

pub use adamw::AdamW;
pub use clip::clip_grad_norm;
pub use optimizer::{Optimizer, OptimizerState, StateBuffers};
pub use sgd::SGD;
