//! Scaler configuration

use super::error::{Result, ScaleError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default name of the batch-size field on a trainable
pub const DEFAULT_BATCH_ARG_NAME: &str = "batch_size";

/// Search strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Keep doubling until a trial exhausts memory
    #[default]
    Power,
    /// Double until exhaustion, then bisect the last fitting/failing interval
    #[serde(alias = "binary_search")]
    BinSearch,
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMode::Power => write!(f, "power"),
            ScaleMode::BinSearch => write!(f, "binsearch"),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "power" => Ok(ScaleMode::Power),
            "binsearch" | "binary_search" => Ok(ScaleMode::BinSearch),
            other => Err(format!("Unknown scale mode: {other} (must be one of: power, binsearch)")),
        }
    }
}

/// Batch-size scaler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Search strategy
    pub mode: ScaleMode,
    /// First batch size probed
    pub init_batch_size: usize,
    /// Maximum number of trials
    pub max_trials: usize,
    /// Training steps run per trial
    pub steps_per_trial: usize,
    /// Smallest batch size the search may probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_batch_size: Option<usize>,
    /// Largest batch size the search may probe (dataset size also caps it)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_batch_size: Option<usize>,
    /// Name of the batch-size field on the trainable
    pub batch_arg_name: String,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            mode: ScaleMode::Power,
            init_batch_size: 2,
            max_trials: 25,
            steps_per_trial: 3,
            min_batch_size: None,
            max_batch_size: None,
            batch_arg_name: DEFAULT_BATCH_ARG_NAME.to_string(),
        }
    }
}

impl ScaleConfig {
    /// Default configuration with the given strategy
    pub fn new(mode: ScaleMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn with_init_batch_size(mut self, size: usize) -> Self {
        self.init_batch_size = size;
        self
    }

    pub fn with_max_trials(mut self, trials: usize) -> Self {
        self.max_trials = trials;
        self
    }

    pub fn with_steps_per_trial(mut self, steps: usize) -> Self {
        self.steps_per_trial = steps;
        self
    }

    /// Clamp probed sizes into `[min, max]`
    pub fn with_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_batch_size = Some(min);
        self.max_batch_size = Some(max);
        self
    }

    pub fn with_batch_arg_name(mut self, name: impl Into<String>) -> Self {
        self.batch_arg_name = name.into();
        self
    }

    /// Check that every knob is usable
    pub fn validate(&self) -> Result<()> {
        if self.init_batch_size == 0 {
            return Err(ScaleError::Configuration("init_batch_size must be > 0".to_string()));
        }
        if self.max_trials == 0 {
            return Err(ScaleError::Configuration("max_trials must be > 0".to_string()));
        }
        if self.steps_per_trial == 0 {
            return Err(ScaleError::Configuration("steps_per_trial must be > 0".to_string()));
        }
        if self.batch_arg_name.trim().is_empty() {
            return Err(ScaleError::Configuration("batch_arg_name cannot be empty".to_string()));
        }
        if self.min_batch_size == Some(0) || self.max_batch_size == Some(0) {
            return Err(ScaleError::Configuration("batch size bounds must be > 0".to_string()));
        }
        if let (Some(min), Some(max)) = (self.min_batch_size, self.max_batch_size) {
            if min > max {
                return Err(ScaleError::Configuration(format!(
                    "min_batch_size ({min}) exceeds max_batch_size ({max})"
                )));
            }
        }
        Ok(())
    }

    /// Inclusive range of batch sizes the search may probe
    ///
    /// The upper end is the smaller of `max_batch_size` and the dataset length.
    pub fn probe_range(&self, dataset_len: Option<usize>) -> Result<(usize, usize)> {
        if dataset_len == Some(0) {
            return Err(ScaleError::Configuration(
                "training dataset is empty, nothing to scale against".to_string(),
            ));
        }
        let min = self.min_batch_size.unwrap_or(1);
        let max = match (self.max_batch_size, dataset_len) {
            (Some(cap), Some(len)) => cap.min(len),
            (Some(cap), None) => cap,
            (None, Some(len)) => len,
            (None, None) => usize::MAX,
        };
        if min > max {
            return Err(ScaleError::Configuration(format!(
                "min_batch_size ({min}) exceeds the largest batch size that can be probed ({max})"
            )));
        }
        Ok((min, max))
    }
}
