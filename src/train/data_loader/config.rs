//! Configuration for batch loading.

use serde::{Deserialize, Serialize};

/// Configuration for batch loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLoaderConfig {
    /// Samples per batch.
    batch_size: usize,
    /// Reshuffle the sample order every epoch.
    shuffle: bool,
    /// Drop the final batch if it is smaller than `batch_size`.
    drop_last: bool,
    /// Seed for shuffling.
    seed: u64,
}

impl Default for DataLoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            shuffle: false,
            drop_last: false,
            seed: 42,
        }
    }
}

impl DataLoaderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Enable or disable shuffling.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Enable or disable dropping the trailing partial batch.
    pub fn with_drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// Set the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Get the batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn drop_last(&self) -> bool {
        self.drop_last
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of batches produced from `samples` samples.
    pub fn num_batches(&self, samples: usize) -> usize {
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }
}
