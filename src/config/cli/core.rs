//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ExperimentSpec;
use crate::tune::ScaleMode;

/// autobatch: find the largest batch size that fits in device memory
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "autobatch")]
#[command(version)]
#[command(about = "Automatic batch-size scaling with power and binary search strategies")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Search for the largest batch size the configured device can run
    Scale(ScaleArgs),

    /// Train from YAML configuration, optionally auto-scaling the batch size first
    Train(TrainArgs),

    /// Validate a configuration file without running anything
    Validate(ValidateArgs),
}

/// Arguments for the scale command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScaleArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override search strategy (power, binsearch)
    #[arg(short, long)]
    pub mode: Option<ScaleMode>,

    /// Override the first batch size probed
    #[arg(short, long)]
    pub init_batch_size: Option<usize>,

    /// Override the trial budget
    #[arg(long)]
    pub max_trials: Option<usize>,

    /// Override training steps per trial
    #[arg(short, long)]
    pub steps_per_trial: Option<usize>,

    /// Write a JSON report of the search to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Scale the batch size with this strategy before training
    #[arg(short, long)]
    pub auto_scale: Option<ScaleMode>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override learning rate
    #[arg(short, long)]
    pub lr: Option<f32>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply scale command overrides to an experiment spec
pub fn apply_scale_overrides(spec: &mut ExperimentSpec, args: &ScaleArgs) {
    if let Some(mode) = args.mode {
        spec.scale.mode = mode;
    }
    if let Some(init) = args.init_batch_size {
        spec.scale.init_batch_size = init;
    }
    if let Some(max_trials) = args.max_trials {
        spec.scale.max_trials = max_trials;
    }
    if let Some(steps) = args.steps_per_trial {
        spec.scale.steps_per_trial = steps;
    }
}

/// Apply train command overrides to an experiment spec
pub fn apply_train_overrides(spec: &mut ExperimentSpec, args: &TrainArgs) {
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(mode) = args.auto_scale {
        spec.training.auto_scale_batch_size = Some(mode);
    }
    if let Some(batch_size) = args.batch_size {
        spec.training.batch_size = Some(batch_size);
    }
    if let Some(lr) = args.lr {
        spec.training.lr = lr;
    }
}
