//! Declarative experiment configuration
//!
//! - `schema`: the YAML experiment spec
//! - [`validate`]: range and consistency checks
//! - `builder`: trainer construction from a spec
//! - [`cli`]: command-line arguments and overrides

mod builder;
pub mod cli;
mod loader;
mod schema;
pub mod validate;

pub use builder::{build_optimizer, build_train_config, build_trainer};
pub use cli::{
    apply_scale_overrides, apply_train_overrides, parse_args, Cli, Command, ScaleArgs, TrainArgs,
    ValidateArgs,
};
pub use loader::{load_spec, parse_spec};
pub use schema::{DataSpec, DeviceSpec, ExperimentSpec, OptimizerKind, TrainingSpec};
pub use validate::{validate_config, ValidationError};
