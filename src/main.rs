//! autobatch CLI
//!
//! # Usage
//!
//! ```bash
//! # Find the largest batch size that fits
//! autobatch scale experiment.yaml
//!
//! # Binary search with a JSON report
//! autobatch scale experiment.yaml --mode binsearch --output report.json
//!
//! # Train, scaling the batch size first
//! autobatch train experiment.yaml --epochs 10 --auto-scale power
//!
//! # Validate config
//! autobatch validate experiment.yaml --detailed
//! ```

use autobatch::cli::{init_tracing, run_command, Cli, LogLevel};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.verbose, cli.quiet));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
