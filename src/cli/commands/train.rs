//! Train command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_train_overrides, build_trainer, load_spec, validate_config, TrainArgs};
use crate::train::{ProgressCallback, TrainResult};

/// Human-readable summary of a finished run
pub fn format_train_result(result: &TrainResult) -> String {
    let mut lines = vec![
        format!("  Epochs: {}", result.final_epoch),
        format!("  Batch size: {}", result.batch_size),
        format!("  Final loss: {:.6}", result.final_loss),
        format!("  Best loss: {:.6}", result.best_loss),
    ];
    if let Some(scale) = &result.scale {
        lines.push(format!(
            "  Auto-scaled: {} search over {} trials",
            scale.mode,
            scale.trials.len()
        ));
    }
    if result.stopped_early {
        lines.push("  Stopped early".to_string());
    }
    lines.join("\n")
}

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("autobatch: training from {}", args.config.display()),
    );

    let mut spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_train_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Config error: {e}"))?;

    let mut trainer = build_trainer(&spec).map_err(|e| format!("Setup error: {e}"))?;
    if level == LogLevel::Verbose {
        trainer.add_callback(ProgressCallback::new(1));
    }

    let result = trainer
        .fit(spec.training.epochs)
        .map_err(|e| format!("Training error: {e}"))?;

    log(level, LogLevel::Normal, "Training complete!");
    log(level, LogLevel::Normal, &format_train_result(&result));
    Ok(())
}
