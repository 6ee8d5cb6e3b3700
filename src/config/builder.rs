//! Build training components from configuration

use super::schema::{ExperimentSpec, OptimizerKind, TrainingSpec};
use crate::device::DeviceMemory;
use crate::error::Result;
use crate::optim::{AdamW, Optimizer, SGD};
use crate::train::{Dataset, TrainConfig, Trainer};
use std::sync::Arc;
use tracing::debug;

const ADAMW_BETA1: f32 = 0.9;
const ADAMW_BETA2: f32 = 0.999;
const ADAMW_EPS: f32 = 1e-8;

/// Build optimizer from configuration
pub fn build_optimizer(spec: &TrainingSpec) -> Box<dyn Optimizer> {
    match spec.optimizer {
        OptimizerKind::Sgd => Box::new(SGD::new(spec.lr, spec.momentum)),
        OptimizerKind::AdamW => Box::new(AdamW::new(
            spec.lr,
            ADAMW_BETA1,
            ADAMW_BETA2,
            ADAMW_EPS,
            spec.weight_decay,
        )),
    }
}

/// Translate the YAML training section into a [`TrainConfig`]
pub fn build_train_config(spec: &ExperimentSpec) -> TrainConfig {
    let training = &spec.training;
    TrainConfig {
        batch_size: training.batch_size,
        max_grad_norm: training.max_grad_norm,
        gradient_accumulation_steps: training.gradient_accumulation_steps.max(1),
        shuffle: spec.data.shuffle,
        drop_last: spec.data.drop_last,
        seed: spec.data.seed,
        auto_scale_batch_size: training.auto_scale_batch_size,
    }
}

/// Build a trainer over the synthetic dataset and simulated device
///
/// The experiment's hyperparameters are attached when present, and the scale
/// section becomes the trainer's scale config for `fit`-time auto-scaling.
pub fn build_trainer(spec: &ExperimentSpec) -> Result<Trainer> {
    let dataset = Arc::new(Dataset::synthetic_linear(
        spec.data.samples,
        spec.data.features,
        spec.data.seed,
    ));
    let device = DeviceMemory::new(spec.device.capacity_bytes);
    let optimizer = build_optimizer(&spec.training);
    debug!(
        optimizer = optimizer.name(),
        samples = spec.data.samples,
        capacity = spec.device.capacity_bytes,
        "building trainer"
    );

    let mut trainer = Trainer::new(dataset, optimizer, build_train_config(spec), device)?;
    // The scale section names the field the loader reads, so it goes first
    trainer.set_scale_config(spec.scale.clone());
    if !spec.training.hparams.is_empty() {
        trainer.set_hparams(spec.training.hparams.clone())?;
    }
    Ok(trainer)
}
