//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::tune::{HParams, ScaleConfig, ScaleMode};

fn create_valid_spec() -> ExperimentSpec {
    ExperimentSpec {
        data: DataSpec { samples: 1000, features: 8, ..Default::default() },
        device: DeviceSpec { capacity_bytes: 64 * 1024 },
        training: TrainingSpec { batch_size: Some(16), lr: 0.01, ..Default::default() },
        scale: ScaleConfig::new(ScaleMode::BinSearch),
    }
}

#[test]
fn test_valid_config() {
    let spec = create_valid_spec();
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_default_config_is_valid() {
    assert!(validate_config(&ExperimentSpec::default()).is_ok());
}

#[test]
fn test_invalid_data_sizes() {
    let mut spec = create_valid_spec();
    spec.data.samples = 0;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidSamples(0))));

    let mut spec = create_valid_spec();
    spec.data.features = 0;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidFeatures(0))));
}

#[test]
fn test_invalid_device_capacity() {
    let mut spec = create_valid_spec();
    spec.device.capacity_bytes = 0;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidDeviceCapacity(0))));
}

#[test]
fn test_invalid_batch_size() {
    let mut spec = create_valid_spec();
    spec.training.batch_size = Some(0);
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidBatchSize(0)));
}

#[test]
fn test_batch_size_from_hparams() {
    let mut spec = create_valid_spec();
    spec.training.batch_size = None;
    spec.training.hparams = HParams::new().with("batch_size", 4usize);
    assert!(validate_config(&spec).is_ok());

    spec.training.hparams = HParams::new().with("batch_size", "large");
    assert!(matches!(validate_config(&spec), Err(ValidationError::MissingBatchSize(_))));

    spec.training.hparams = HParams::new().with("batch_size", 0usize);
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidBatchSize(0))));
}

#[test]
fn test_missing_batch_size() {
    let mut spec = create_valid_spec();
    spec.training.batch_size = None;
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::MissingBatchSize(_)));
    assert!(err.to_string().contains("hparams.batch_size"));
}

#[test]
fn test_custom_batch_arg_name_reads_hparams() {
    let mut spec = create_valid_spec();
    spec.training.batch_size = Some(2);
    spec.scale = spec.scale.with_batch_arg_name("micro_batch");

    // The top-level field does not count under a custom name
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::MissingBatchSize(ref name) if name == "micro_batch"));
    assert!(err.to_string().contains("hparams.micro_batch"));

    spec.training.hparams = HParams::new().with("micro_batch", 2usize);
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_learning_rate() {
    let mut spec = create_valid_spec();
    spec.training.lr = 0.0;
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidLearningRate(0.0)));

    spec.training.lr = 1.5;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidLearningRate(_))));

    spec.training.lr = f32::NAN;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidLearningRate(_))));
}

#[test]
fn test_invalid_epochs() {
    let mut spec = create_valid_spec();
    spec.training.epochs = 0;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidEpochs(0))));
}

#[test]
fn test_invalid_momentum() {
    let mut spec = create_valid_spec();
    spec.training.momentum = 1.0;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidMomentum(_))));

    spec.training.momentum = -0.1;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidMomentum(_))));
}

#[test]
fn test_invalid_weight_decay() {
    let mut spec = create_valid_spec();
    spec.training.weight_decay = -0.01;
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidWeightDecay(_))));
}

#[test]
fn test_invalid_grad_clip() {
    let mut spec = create_valid_spec();
    spec.training.max_grad_norm = Some(0.0);
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidGradClip(_))));

    spec.training.max_grad_norm = None;
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_accumulation_steps() {
    let mut spec = create_valid_spec();
    spec.training.gradient_accumulation_steps = 0;
    assert!(matches!(
        validate_config(&spec),
        Err(ValidationError::InvalidAccumulationSteps(0))
    ));
}

#[test]
fn test_invalid_scale_config() {
    let mut spec = create_valid_spec();
    spec.scale.max_trials = 0;
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidScale(_)));
    assert!(err.to_string().contains("max_trials"));
}

#[test]
fn test_scale_bounds_checked_against_dataset() {
    let mut spec = create_valid_spec();
    spec.data.samples = 10;
    spec.scale = ScaleConfig::default().with_bounds(64, 128);
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidScale(_)));
}

#[test]
fn test_error_messages() {
    let err = ValidationError::InvalidBatchSize(0);
    assert_eq!(err.to_string(), "Invalid batch size: 0 (must be > 0)");

    let err = ValidationError::InvalidScale("max_trials must be > 0".to_string());
    assert_eq!(err.to_string(), "Invalid scale config: max_trials must be > 0");
}
