//! autobatch: automatic batch-size scaling for training loops
//!
//! Finds the largest batch size a training loop can run without exhausting
//! device memory, then commits it while leaving every other piece of trainer
//! state exactly as it was.
//!
//! # Modules
//!
//! - [`tune`] - the batch-size scaler (power and binary search strategies)
//! - [`train`] - a small trainer with a rebuildable data loader that implements [`tune::Trainable`]
//! - [`optim`] - optimizers with restorable state and gradient clipping
//! - [`device`] - simulated accelerator memory pool
//! - [`config`] - YAML experiment schema, validation and CLI arguments
//!
//! # Example
//!
//! ```no_run
//! use autobatch::tune::{scale_batch_size, ScaleConfig, ScaleMode};
//! use autobatch::train::{Dataset, TrainConfig, Trainer};
//! use autobatch::optim::SGD;
//! use autobatch::device::DeviceMemory;
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(Dataset::synthetic_linear(1000, 8, 42));
//! let device = DeviceMemory::new(64 * 1024);
//! let config = TrainConfig::default().with_batch_size(2);
//! let mut trainer = Trainer::new(dataset, Box::new(SGD::new(0.01, 0.9)), config, device)?;
//!
//! let scale = ScaleConfig::new(ScaleMode::BinSearch).with_init_batch_size(2);
//! let result = scale_batch_size(&mut trainer, &scale)?;
//! println!("discovered batch size: {}", result.batch_size);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod optim;
pub mod train;
pub mod tune;

mod tensor;

pub use error::{Error, Result};
pub use tensor::Tensor;
