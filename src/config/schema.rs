//! YAML schema for experiment configuration
//!
//! An experiment describes the synthetic dataset, the simulated device, the
//! training loop and the batch-size scaler. Every section is optional and
//! falls back to its defaults.

use crate::tune::{HParams, ScaleConfig, ScaleMode};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`)
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

/// Complete experiment specification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSpec {
    /// Synthetic dataset
    pub data: DataSpec,
    /// Simulated accelerator
    pub device: DeviceSpec,
    /// Training loop
    pub training: TrainingSpec,
    /// Batch-size scaler
    pub scale: ScaleConfig,
}

/// Synthetic linear-regression dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSpec {
    /// Number of samples
    pub samples: usize,
    /// Features per sample
    pub features: usize,
    /// Generator seed (also seeds shuffling)
    pub seed: u64,
    /// Reshuffle every epoch
    #[serde(deserialize_with = "deserialize_bool_lenient")]
    pub shuffle: bool,
    /// Drop the trailing partial batch
    #[serde(deserialize_with = "deserialize_bool_lenient")]
    pub drop_last: bool,
}

impl Default for DataSpec {
    fn default() -> Self {
        Self { samples: 1000, features: 8, seed: 42, shuffle: true, drop_last: false }
    }
}

/// Simulated device memory pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSpec {
    /// Total pool size in bytes
    pub capacity_bytes: usize,
}

impl Default for DeviceSpec {
    fn default() -> Self {
        Self { capacity_bytes: 1 << 20 }
    }
}

/// Optimizer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// SGD with momentum
    Sgd,
    /// AdamW with decoupled weight decay
    #[default]
    AdamW,
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerKind::Sgd => write!(f, "sgd"),
            OptimizerKind::AdamW => write!(f, "adamw"),
        }
    }
}

fn default_batch_size() -> Option<usize> {
    Some(32)
}

/// Training loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSpec {
    /// Samples per batch; `null` reads it from `hparams.batch_size` instead
    #[serde(default = "default_batch_size")]
    pub batch_size: Option<usize>,
    /// Learning rate
    pub lr: f32,
    /// Optimizer
    pub optimizer: OptimizerKind,
    /// SGD momentum
    pub momentum: f32,
    /// AdamW weight decay
    pub weight_decay: f32,
    /// Global gradient-norm clip; `null` disables clipping
    pub max_grad_norm: Option<f32>,
    /// Batches accumulated per optimizer step
    pub gradient_accumulation_steps: usize,
    /// Epochs for `train`
    pub epochs: usize,
    /// Scale the batch size before training
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale_batch_size: Option<ScaleMode>,
    /// Free-form hyperparameters attached to the trainer
    #[serde(skip_serializing_if = "HParams::is_empty")]
    pub hparams: HParams,
}

impl Default for TrainingSpec {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            lr: 0.01,
            optimizer: OptimizerKind::default(),
            momentum: 0.9,
            weight_decay: 0.01,
            max_grad_norm: Some(1.0),
            gradient_accumulation_steps: 1,
            epochs: 1,
            auto_scale_batch_size: None,
            hparams: HParams::default(),
        }
    }
}
