//! Scale command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_scale_overrides, build_trainer, load_spec, validate_config, ScaleArgs};
use crate::tune::{scale_batch_size, ScaleResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON report written by `autobatch scale --output`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleReport {
    /// Experiment file the search ran against
    pub config: String,
    /// Dataset size, the upper clamp for probes
    pub samples: usize,
    /// Simulated device capacity in bytes
    pub capacity_bytes: usize,
    /// Search outcome
    #[serde(flatten)]
    pub result: ScaleResult,
}

/// One line per trial, e.g. `  #3 batch size 8: fits`
pub fn format_trials(result: &ScaleResult) -> String {
    result
        .trials
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let outcome = if o.fits() { "fits" } else { "out of memory" };
            format!("  #{} batch size {}: {outcome}", i + 1, o.batch_size)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_report(path: &Path, report: &ScaleReport) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report: {e}"))?;
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write report {}: {e}", path.display()))
}

pub fn run_scale(args: ScaleArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("autobatch: scaling batch size for {}", args.config.display()),
    );

    let mut spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_scale_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Config error: {e}"))?;

    let mut trainer = build_trainer(&spec).map_err(|e| format!("Setup error: {e}"))?;
    let result =
        scale_batch_size(&mut trainer, &spec.scale).map_err(|e| format!("Scale error: {e}"))?;

    log(level, LogLevel::Verbose, &format_trials(&result));
    if let Some(warning) = &result.warning {
        log(level, LogLevel::Normal, &format!("Warning: {warning}"));
    }
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Batch size: {} ({} search, {} trials)",
            result.batch_size,
            result.mode,
            result.trials.len()
        ),
    );

    if let Some(output) = &args.output {
        let report = ScaleReport {
            config: args.config.display().to_string(),
            samples: spec.data.samples,
            capacity_bytes: spec.device.capacity_bytes,
            result,
        };
        write_report(output, &report)?;
        log(
            level,
            LogLevel::Normal,
            &format!("Report written to {}", output.display()),
        );
    }

    Ok(())
}
