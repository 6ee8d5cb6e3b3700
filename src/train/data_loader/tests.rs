//! Tests for the batching data loader.

use super::{DataLoader, DataLoaderConfig};
use crate::train::Dataset;
use std::collections::BTreeSet;
use std::sync::Arc;

fn dataset(samples: usize) -> Arc<Dataset> {
    Arc::new(Dataset::synthetic_linear(samples, 3, 11))
}

// =========================================================================
// DataLoaderConfig Tests
// =========================================================================

#[test]
fn test_config_default() {
    let config = DataLoaderConfig::default();
    assert_eq!(config.batch_size(), 1);
    assert!(!config.shuffle());
    assert!(!config.drop_last());
    assert_eq!(config.seed(), 42);
}

#[test]
fn test_config_batch_size_minimum() {
    let config = DataLoaderConfig::new().with_batch_size(0);
    assert_eq!(config.batch_size(), 1, "batch size should be at least 1");
}

#[test]
fn test_config_num_batches() {
    let config = DataLoaderConfig::new().with_batch_size(3);
    assert_eq!(config.num_batches(10), 4);
    assert_eq!(config.clone().with_drop_last(true).num_batches(10), 3);
    assert_eq!(config.num_batches(0), 0);
}

#[test]
fn test_config_serialize_json() {
    let config = DataLoaderConfig::new().with_batch_size(16).with_shuffle(true);
    let json = serde_json::to_string(&config).unwrap();
    let deserialized: DataLoaderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, deserialized);
}

// =========================================================================
// DataLoader Tests
// =========================================================================

#[test]
fn test_sequential_batches_cover_dataset() {
    let loader = DataLoader::new(dataset(10), DataLoaderConfig::new().with_batch_size(4));

    let sizes: Vec<usize> = loader.iter(0).map(|b| b.size()).collect();
    assert_eq!(sizes, vec![4, 4, 2]);
    assert_eq!(loader.iter(0).len(), 3);
}

#[test]
fn test_drop_last() {
    let config = DataLoaderConfig::new().with_batch_size(4).with_drop_last(true);
    let loader = DataLoader::new(dataset(10), config);

    let sizes: Vec<usize> = loader.iter(0).map(|b| b.size()).collect();
    assert_eq!(sizes, vec![4, 4]);
}

#[test]
fn test_batch_larger_than_dataset() {
    let loader = DataLoader::new(dataset(5), DataLoaderConfig::new().with_batch_size(64));
    let batches: Vec<_> = loader.iter(0).collect();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].size(), 5);
}

#[test]
fn test_shuffle_is_a_permutation() {
    let config = DataLoaderConfig::new().with_batch_size(8).with_shuffle(true).with_seed(3);
    let loader = DataLoader::new(dataset(100), config);

    let order = loader.order(0);
    let unique: BTreeSet<usize> = order.iter().copied().collect();
    assert_eq!(unique.len(), 100);
    assert_ne!(order, (0..100).collect::<Vec<_>>());
}

#[test]
fn test_shuffle_reproducible_per_epoch() {
    let config = DataLoaderConfig::new().with_batch_size(8).with_shuffle(true);
    let a = DataLoader::new(dataset(50), config.clone());
    let b = DataLoader::new(dataset(50), config);

    assert_eq!(a.order(2), b.order(2));
    assert_ne!(a.order(0), a.order(1));
}

#[test]
fn test_size_hint_decreases() {
    let loader = DataLoader::new(dataset(9), DataLoaderConfig::new().with_batch_size(3));
    let mut iter = loader.iter(0);
    assert_eq!(iter.size_hint(), (3, Some(3)));
    iter.next();
    assert_eq!(iter.size_hint(), (2, Some(2)));
}
