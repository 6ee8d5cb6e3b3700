//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::ExperimentSpec;
use crate::tune::DEFAULT_BATCH_ARG_NAME;

/// Validate an experiment specification
///
/// Checks:
/// - Dataset and device sizes are non-zero
/// - A batch size is configured, either directly or in `hparams`
/// - Numeric training values are in valid ranges
/// - The scaler config is usable against the dataset
pub fn validate_config(spec: &ExperimentSpec) -> Result<(), ValidationError> {
    if spec.data.samples == 0 {
        return Err(ValidationError::InvalidSamples(spec.data.samples));
    }
    if spec.data.features == 0 {
        return Err(ValidationError::InvalidFeatures(spec.data.features));
    }
    if spec.device.capacity_bytes == 0 {
        return Err(ValidationError::InvalidDeviceCapacity(spec.device.capacity_bytes));
    }

    validate_batch_size(spec)?;

    let training = &spec.training;
    if training.lr <= 0.0 || training.lr > 1.0 || training.lr.is_nan() {
        return Err(ValidationError::InvalidLearningRate(training.lr));
    }
    if training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(training.epochs));
    }
    if !(0.0..1.0).contains(&training.momentum) {
        return Err(ValidationError::InvalidMomentum(training.momentum));
    }
    if training.weight_decay < 0.0 || training.weight_decay.is_nan() {
        return Err(ValidationError::InvalidWeightDecay(training.weight_decay));
    }
    if let Some(clip) = training.max_grad_norm {
        if clip <= 0.0 || clip.is_nan() {
            return Err(ValidationError::InvalidGradClip(clip));
        }
    }
    if training.gradient_accumulation_steps == 0 {
        return Err(ValidationError::InvalidAccumulationSteps(
            training.gradient_accumulation_steps,
        ));
    }

    spec.scale
        .validate()
        .and_then(|()| spec.scale.probe_range(Some(spec.data.samples)).map(|_| ()))
        .map_err(|e| ValidationError::InvalidScale(e.to_string()))?;

    Ok(())
}

fn validate_batch_size(spec: &ExperimentSpec) -> Result<(), ValidationError> {
    let name = spec.scale.batch_arg_name.as_str();
    // Only the default name maps to `training.batch_size`
    let top_level = spec.training.batch_size.filter(|_| name == DEFAULT_BATCH_ARG_NAME);
    match top_level {
        Some(0) => Err(ValidationError::InvalidBatchSize(0)),
        Some(_) => Ok(()),
        None => {
            let value = spec
                .training
                .hparams
                .get(name)
                .and_then(|v| v.as_int())
                .ok_or_else(|| ValidationError::MissingBatchSize(name.to_string()))?;
            if value <= 0 {
                return Err(ValidationError::InvalidBatchSize(0));
            }
            Ok(())
        }
    }
}
