//! Batch-size scaler integration tests
//!
//! Drives the scaler against the real trainer over the simulated device:
//! - The search lands on the device's true feasibility boundary
//! - Trainer state survives every search outcome untouched
//! - Probes never exceed the dataset size

use autobatch::device::DeviceMemory;
use autobatch::optim::{AdamW, SGD};
use autobatch::train::{DataLoader, Dataset, TrainConfig, Trainer};
use autobatch::tune::{scale_batch_size, ScaleConfig, ScaleError, ScaleMode, Tuner};
use proptest::prelude::*;
use std::sync::Arc;

/// Trainer whose device runs steps of up to `max_batch` samples and no more
fn trainer_with_limit(samples: usize, max_batch: usize, config: TrainConfig) -> Trainer {
    let dataset = Arc::new(Dataset::synthetic_linear(samples, 8, 7));
    let sizing = Trainer::new(
        Arc::clone(&dataset),
        Box::new(SGD::new(0.01, 0.9)),
        TrainConfig::default(),
        DeviceMemory::new(usize::MAX),
    )
    .unwrap();
    let capacity = sizing.device().stats().persistent + sizing.step_memory_bytes(max_batch);
    let optimizer = Box::new(AdamW::default_params(0.01));
    Trainer::new(dataset, optimizer, config, DeviceMemory::new(capacity)).unwrap()
}

// =============================================================================
// Search outcomes
// =============================================================================

#[test]
fn test_power_and_binsearch_on_reference_case() {
    let config = TrainConfig::default().with_batch_size(1);

    let mut power = trainer_with_limit(1000, 300, config.clone());
    let power_config = ScaleConfig::new(ScaleMode::Power).with_init_batch_size(1);
    let result = scale_batch_size(&mut power, &power_config).unwrap();
    assert_eq!(result.batch_size, 256);
    assert_eq!(result.probed_sizes(), vec![1, 2, 4, 8, 16, 32, 64, 128, 256, 512]);

    let mut binsearch = trainer_with_limit(1000, 300, config);
    let binsearch_config = ScaleConfig::new(ScaleMode::BinSearch).with_init_batch_size(1);
    let result = scale_batch_size(&mut binsearch, &binsearch_config).unwrap();
    assert_eq!(result.batch_size, 300);
    assert!(result.converged);
    assert_eq!(binsearch.data_loader().map(DataLoader::batch_size), Some(300));
}

#[test]
fn test_training_continues_with_discovered_size() {
    let mut trainer = trainer_with_limit(600, 150, TrainConfig::default().with_batch_size(2));

    let result = scale_batch_size(&mut trainer, &ScaleConfig::new(ScaleMode::BinSearch)).unwrap();
    assert_eq!(result.batch_size, 150);

    let train = trainer.fit(2).unwrap();
    assert_eq!(train.batch_size, 150);
    assert_eq!(trainer.metrics.steps, 8);
    assert!(train.final_loss.is_finite());
}

#[test]
fn test_fit_with_auto_scale() {
    let config = TrainConfig::default().with_batch_size(2).with_auto_scale(ScaleMode::BinSearch);
    let mut trainer = trainer_with_limit(400, 90, config);

    let result = trainer.fit(1).unwrap();

    let scale = result.scale.unwrap();
    assert_eq!(scale.batch_size, 90);
    assert_eq!(result.batch_size, 90);
    assert_eq!(trainer.metrics.epoch, 1);
}

#[test]
fn test_budget_exhausted_without_a_fit() {
    let mut trainer = trainer_with_limit(500, 10, TrainConfig::default().with_batch_size(64));
    let before = trainer.state();
    let config = ScaleConfig::new(ScaleMode::Power).with_init_batch_size(64).with_max_trials(2);

    let err = scale_batch_size(&mut trainer, &config).unwrap_err();

    match err {
        ScaleError::SearchFailed { init_batch_size, smallest_probed, trials } => {
            assert_eq!(init_batch_size, 64);
            assert_eq!(smallest_probed, 32);
            assert_eq!(trials, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(trainer.state(), before);
}

#[test]
fn test_tuner_remembers_result() {
    let mut trainer = trainer_with_limit(300, 40, TrainConfig::default().with_batch_size(2));
    let mut tuner = Tuner::new(ScaleConfig::new(ScaleMode::BinSearch));

    assert_eq!(tuner.batch_size(), None);
    tuner.scale_batch_size(&mut trainer).unwrap();
    assert_eq!(tuner.batch_size(), Some(40));
    assert_eq!(trainer.batch_size(), Some(40));
}

#[test]
fn test_device_clean_after_search() {
    let mut trainer = trainer_with_limit(1000, 77, TrainConfig::default().with_batch_size(2));

    scale_batch_size(&mut trainer, &ScaleConfig::new(ScaleMode::BinSearch)).unwrap();

    let stats = trainer.device().stats();
    assert_eq!(stats.allocated, 0);
    assert!(stats.peak <= trainer.device().capacity());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_binsearch_finds_feasibility_boundary(
        samples in 20usize..600,
        limit in 1usize..700,
        init_seed in 1usize..64,
    ) {
        let init = init_seed.min(limit);
        let train_config = TrainConfig::default().with_batch_size(init);
        let mut trainer = trainer_with_limit(samples, limit, train_config);
        let before = trainer.state();
        let config = ScaleConfig::new(ScaleMode::BinSearch).with_init_batch_size(init);

        let result = scale_batch_size(&mut trainer, &config).unwrap();

        prop_assert_eq!(result.batch_size, limit.min(samples));
        prop_assert!(result.probed_sizes().iter().all(|&b| b <= samples));

        let mut after = trainer.state();
        prop_assert_eq!(after.config.batch_size, Some(result.batch_size));
        after.config.batch_size = before.config.batch_size;
        prop_assert_eq!(after, before);
    }

    #[test]
    fn prop_power_result_is_feasible_power_of_two_multiple(
        limit in 1usize..700,
        init in 1usize..8,
    ) {
        prop_assume!(init <= limit);
        let train_config = TrainConfig::default().with_batch_size(init);
        let mut trainer = trainer_with_limit(2000, limit, train_config);
        let config = ScaleConfig::new(ScaleMode::Power).with_init_batch_size(init);

        let result = scale_batch_size(&mut trainer, &config).unwrap();

        prop_assert!(result.batch_size <= limit);
        prop_assert!(result.batch_size * 2 > limit);
        prop_assert_eq!(result.batch_size % init, 0);
        prop_assert!((result.batch_size / init).is_power_of_two());
    }
}
