//! Callback system for training events
//!
//! Provides hooks for training loop events:
//! - `on_train_begin` / `on_train_end`
//! - `on_epoch_begin` / `on_epoch_end`
//! - `on_step_begin` / `on_step_end`
//!
//! # Example
//!
//! ```rust
//! use autobatch::train::callback::{CallbackAction, CallbackContext, TrainerCallback};
//!
//! struct PrintCallback;
//!
//! impl TrainerCallback for PrintCallback {
//!     fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
//!         println!("Epoch {} finished with loss {:.4}", ctx.epoch, ctx.loss);
//!         CallbackAction::Continue
//!     }
//! }
//! ```

mod manager;
mod progress;
mod traits;

pub use manager::CallbackManager;
pub use progress::ProgressCallback;
pub use traits::{CallbackAction, CallbackContext, TrainerCallback};
