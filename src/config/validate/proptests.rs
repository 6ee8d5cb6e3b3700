//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::tune::{ScaleConfig, ScaleMode};
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = ExperimentSpec> {
    (
        1usize..5000,                       // samples
        1usize..64,                         // features
        1usize..256,                        // batch_size
        1e-6f32..1.0,                       // lr
        1usize..100,                        // epochs
        proptest::option::of(0.1f32..10.0), // max_grad_norm
        prop_oneof![Just(ScaleMode::Power), Just(ScaleMode::BinSearch)],
    )
        .prop_map(|(samples, features, batch_size, lr, epochs, max_grad_norm, mode)| {
            ExperimentSpec {
                data: DataSpec { samples, features, ..Default::default() },
                device: DeviceSpec::default(),
                training: TrainingSpec {
                    batch_size: Some(batch_size),
                    lr,
                    epochs,
                    max_grad_norm,
                    ..Default::default()
                },
                scale: ScaleConfig::new(mode),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.training.batch_size = Some(0);
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_nonpositive_lr_fails(spec in arb_valid_spec(), lr in -1.0f32..=0.0) {
        let mut spec = spec;
        spec.training.lr = lr;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidLearningRate(_))
        ));
    }

    #[test]
    fn prop_zero_trials_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.scale.max_trials = 0;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidScale(_))
        ));
    }

    #[test]
    fn prop_yaml_roundtrip_stays_valid(spec in arb_valid_spec()) {
        let yaml = serde_yaml::to_string(&spec).unwrap();
        let parsed: ExperimentSpec = serde_yaml::from_str(&yaml).unwrap();
        prop_assert!(validate_config(&parsed).is_ok());
        prop_assert_eq!(parsed.training.batch_size, spec.training.batch_size);
        prop_assert_eq!(parsed.scale, spec.scale);
    }
}
