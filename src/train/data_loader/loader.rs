//! Data loader implementation.

use super::config::DataLoaderConfig;
use super::iter::DataLoaderIter;
use crate::train::{Batch, Dataset};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

/// Splits a shared dataset into batches.
#[derive(Debug, Clone, PartialEq)]
pub struct DataLoader {
    dataset: Arc<Dataset>,
    config: DataLoaderConfig,
}

impl DataLoader {
    /// Create a loader over `dataset`.
    pub fn new(dataset: Arc<Dataset>, config: DataLoaderConfig) -> Self {
        Self { dataset, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &DataLoaderConfig {
        &self.config
    }

    pub fn batch_size(&self) -> usize {
        self.config.batch_size()
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Number of batches per epoch.
    pub fn num_batches(&self) -> usize {
        self.config.num_batches(self.dataset.len())
    }

    /// Sample order for `epoch`; identical for identical seeds and epochs.
    pub fn order(&self, epoch: u64) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        if self.config.shuffle() {
            let mut rng = StdRng::seed_from_u64(self.config.seed().wrapping_add(epoch));
            order.shuffle(&mut rng);
        }
        order
    }

    /// Batch `index` of the given sample order.
    pub(crate) fn batch_at(&self, order: &[usize], index: usize) -> Option<Batch> {
        if index >= self.num_batches() {
            return None;
        }
        let start = index * self.batch_size();
        let end = (start + self.batch_size()).min(order.len());
        Some(self.dataset.gather(&order[start..end]))
    }

    /// Iterate over the batches of one epoch.
    pub fn iter(&self, epoch: u64) -> DataLoaderIter<'_> {
        DataLoaderIter::new(self, self.order(epoch))
    }
}
