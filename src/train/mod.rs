//! Host training loop
//!
//! A deliberately small trainer that is still a realistic target for the
//! batch-size scaler:
//! - Linear regression model with MSE loss
//! - Shared [`Dataset`] and a [`DataLoader`] rebuilt from the batch-size field
//! - Per-step device allocations that fail when the batch is too large
//! - Callbacks, gradient accumulation and gradient clipping
//!
//! # Example
//!
//! ```no_run
//! use autobatch::device::DeviceMemory;
//! use autobatch::optim::SGD;
//! use autobatch::train::{Dataset, TrainConfig, Trainer};
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(Dataset::synthetic_linear(1000, 8, 42));
//! let config = TrainConfig::default().with_batch_size(64);
//! let optimizer = Box::new(SGD::new(0.01, 0.9));
//! let mut trainer = Trainer::new(dataset, optimizer, config, DeviceMemory::new(1 << 20))?;
//!
//! for epoch in 0..3 {
//!     let result = trainer.fit(1)?;
//!     println!("Epoch {}: loss={:.4}", epoch, result.final_loss);
//! }
//! # Ok::<(), autobatch::train::TrainError>(())
//! ```

mod batch;
pub mod callback;
mod config;
mod data_loader;
mod dataset;
mod error;
mod model;
mod trainer;


pub use batch::Batch;
pub use callback::{
    CallbackAction, CallbackContext, CallbackManager, ProgressCallback, TrainerCallback,
};
pub use config::{MetricsTracker, TrainConfig};
pub use data_loader::{DataLoader, DataLoaderConfig, DataLoaderIter};
pub use dataset::Dataset;
pub use error::TrainError;
pub use model::LinearModel;
pub use trainer::{TrainResult, Trainer, TrainerSnapshot, TrainerState};
