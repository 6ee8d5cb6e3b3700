//! Batching data loader
//!
//! A [`DataLoader`] is cheap to rebuild: it holds a shared handle to the
//! dataset plus its [`DataLoaderConfig`], and computes the sample order per
//! epoch. The batch-size scaler rebuilds it after every change of the
//! batch-size field.
//!
//! # Example
//!
//! ```
//! use autobatch::train::{DataLoader, DataLoaderConfig, Dataset};
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(Dataset::synthetic_linear(10, 3, 42));
//! let config = DataLoaderConfig::new().with_batch_size(4).with_shuffle(true);
//!
//! let loader = DataLoader::new(dataset, config);
//! assert_eq!(loader.num_batches(), 3);
//! for batch in loader.iter(0) {
//!     assert!(batch.size() <= 4);
//! }
//! ```

mod config;
mod iter;
mod loader;

#[cfg(test)]
mod tests;

pub use config::DataLoaderConfig;
pub use iter::DataLoaderIter;
pub use loader::DataLoader;
