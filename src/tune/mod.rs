//! Automatic batch-size scaling
//!
//! Searches for the largest batch size a trainer can run without exhausting
//! device memory. Each trial rebuilds the trainer's data loader at a candidate
//! size and runs a few training steps; the outcome drives either a doubling
//! search (`power`) or a doubling search refined by bisection (`binsearch`).
//!
//! All trainer state is snapshotted before the first trial and restored
//! afterwards. Only the batch-size field keeps the discovered value.
//!
//! # Example
//!
//! ```no_run
//! use autobatch::tune::{ScaleConfig, ScaleMode, Tuner};
//! # use autobatch::train::Trainer;
//! # let mut trainer: Trainer = todo!();
//!
//! let config = ScaleConfig::new(ScaleMode::BinSearch)
//!     .with_init_batch_size(2)
//!     .with_max_trials(25)
//!     .with_steps_per_trial(3);
//!
//! let mut tuner = Tuner::new(config);
//! let result = tuner.scale_batch_size(&mut trainer)?;
//! println!("batch size {} after {} trials", result.batch_size, result.trials.len());
//! # Ok::<(), autobatch::tune::ScaleError>(())
//! ```

mod config;
mod error;
mod field;
mod guard;
mod hparams;
mod scaler;
mod search;
mod trainable;
mod trial;


pub use config::{ScaleConfig, ScaleMode, DEFAULT_BATCH_ARG_NAME};
pub use error::{BoxError, Result, ScaleError, ScaleWarning};
pub use field::{BatchSizeField, FieldLocation};
pub use hparams::{HParams, ParamValue};
pub use scaler::{scale_batch_size, ScaleResult, Tuner};
pub use search::{BatchSizeSearch, Conclusion, Phase, SearchBounds, Step};
pub use trainable::{Trainable, TrialOutcome};
pub use trial::{Fit, Observation, TrialState};
