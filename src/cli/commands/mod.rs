//! CLI command implementations

mod scale;
mod train;
mod validate;


use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Scale(args) => scale::run_scale(args, log_level),
        Command::Train(args) => train::run_train(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    }
}
