//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_spec, ExperimentSpec, ValidateArgs};

/// Format data configuration as a string
pub fn format_data_info(spec: &ExperimentSpec) -> String {
    format!(
        "  Samples: {}\n  Features: {}\n  Seed: {}\n  Shuffle: {}",
        spec.data.samples, spec.data.features, spec.data.seed, spec.data.shuffle
    )
}

/// Format device configuration as a string
pub fn format_device_info(spec: &ExperimentSpec) -> String {
    format!("  Device capacity: {} bytes", spec.device.capacity_bytes)
}

/// Format training configuration as a string
pub fn format_training_info(spec: &ExperimentSpec) -> String {
    let training = &spec.training;
    let batch_size = match training.batch_size {
        Some(size) => size.to_string(),
        None => "from hparams".to_string(),
    };
    let mut lines = vec![
        format!("  Batch size: {batch_size}"),
        format!("  Optimizer: {} (lr={})", training.optimizer, training.lr),
        format!("  Epochs: {}", training.epochs),
    ];
    if let Some(clip) = training.max_grad_norm {
        lines.push(format!("  Gradient clipping: {clip}"));
    }
    if training.gradient_accumulation_steps > 1 {
        lines.push(format!(
            "  Gradient accumulation: {}",
            training.gradient_accumulation_steps
        ));
    }
    if let Some(mode) = training.auto_scale_batch_size {
        lines.push(format!("  Auto-scale: {mode}"));
    }
    for (name, value) in training.hparams.iter() {
        lines.push(format!("  hparams.{name}: {value}"));
    }
    lines.join("\n")
}

/// Format scaler configuration as a string
pub fn format_scale_info(spec: &ExperimentSpec) -> String {
    let scale = &spec.scale;
    let mut lines = vec![
        format!("  Scale mode: {}", scale.mode),
        format!("  Initial batch size: {}", scale.init_batch_size),
        format!("  Max trials: {}", scale.max_trials),
        format!("  Steps per trial: {}", scale.steps_per_trial),
    ];
    if let Some(min) = scale.min_batch_size {
        lines.push(format!("  Min batch size: {min}"));
    }
    if let Some(max) = scale.max_batch_size {
        lines.push(format!("  Max batch size: {max}"));
    }
    lines.join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &ExperimentSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_data_info(spec));
    println!();
    println!("{}", format_device_info(spec));
    println!();
    println!("{}", format_training_info(spec));
    println!();
    println!("{}", format_scale_info(spec));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    // load_spec validates after parsing
    let spec = load_spec(&args.config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed && level != LogLevel::Quiet {
        print_detailed_summary(&spec);
    }

    Ok(())
}
