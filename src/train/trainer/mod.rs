//! Trainer abstraction for training loops
//!
//! The [`Trainer`] owns model parameters, the optimizer, a rebuildable data
//! loader and a simulated device memory pool. It provides:
//! - Single training steps that allocate device memory per step
//! - Multi-epoch training with callbacks and gradient accumulation
//! - Optional batch-size scaling before the first epoch
//! - A [`Trainable`](crate::tune::Trainable) implementation for the scaler
//!
//! # Example
//!
//! ```no_run
//! use autobatch::device::DeviceMemory;
//! use autobatch::optim::AdamW;
//! use autobatch::train::{Dataset, ProgressCallback, TrainConfig, Trainer};
//! use autobatch::tune::ScaleMode;
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(Dataset::synthetic_linear(2048, 16, 7));
//! let config = TrainConfig::default().with_auto_scale(ScaleMode::BinSearch);
//! let mut trainer = Trainer::new(
//!     dataset,
//!     Box::new(AdamW::default_params(1e-3)),
//!     config,
//!     DeviceMemory::new(1 << 20),
//! )?;
//! trainer.add_callback(ProgressCallback::new(10));
//!
//! let result = trainer.fit(5)?;
//! println!("trained with batch size {}", result.batch_size);
//! # Ok::<(), autobatch::train::TrainError>(())
//! ```

mod core;
mod fit;
mod result;
mod step;
mod trainable;

pub use core::{Trainer, TrainerState};
pub use result::TrainResult;
pub use trainable::TrainerSnapshot;
