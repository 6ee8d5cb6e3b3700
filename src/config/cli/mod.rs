//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! autobatch scale experiment.yaml --mode binsearch --output report.json
//! autobatch train experiment.yaml --epochs 5 --auto-scale power
//! autobatch validate experiment.yaml --detailed
//! ```

mod core;

pub use core::{
    apply_scale_overrides, apply_train_overrides, parse_args, Cli, Command, ScaleArgs, TrainArgs,
    ValidateArgs,
};
