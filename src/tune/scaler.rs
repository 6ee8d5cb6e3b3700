//! Batch-size scaler entry points

use super::config::{ScaleConfig, ScaleMode};
use super::error::{Result, ScaleError, ScaleWarning};
use super::field::BatchSizeField;
use super::guard::RestoreGuard;
use super::search::{Conclusion, Step};
use super::trainable::{Trainable, TrialOutcome};
use super::trial::{Observation, TrialState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of a successful search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleResult {
    /// Batch size written back to the trainable
    pub batch_size: usize,
    /// Strategy used
    pub mode: ScaleMode,
    /// Whether the fit/exhaust boundary was pinned down within the budget
    pub converged: bool,
    /// Every probe in the order it ran
    pub trials: Vec<Observation>,
    /// Set when the search returned its best guess instead of converging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<ScaleWarning>,
}

impl ScaleResult {
    /// Batch sizes probed, in order
    pub fn probed_sizes(&self) -> Vec<usize> {
        self.trials.iter().map(|o| o.batch_size).collect()
    }
}

/// Find the largest batch size the trainable can run and commit it
///
/// Every trial rebuilds the data loader at the candidate size and runs
/// `steps_per_trial` training steps. Out-of-memory trials are recorded and
/// their memory reclaimed; any other trial failure aborts the search.
///
/// The trainable's state is snapshotted before the first trial and restored
/// on every exit path. On success only the batch-size field differs from the
/// snapshot, and the data loader has been rebuilt with the new size.
///
/// # Errors
///
/// - [`ScaleError::Configuration`] before any trial, if the config is invalid,
///   the batch-size field cannot be found or is not the one the loader reads,
///   the trainable uses an external loader, or it runs distributed
/// - [`ScaleError::SearchFailed`] if no size fits within the budget
/// - [`ScaleError::Trial`] / [`ScaleError::Loader`] for non-memory failures
pub fn scale_batch_size<T: Trainable>(
    trainable: &mut T,
    config: &ScaleConfig,
) -> Result<ScaleResult> {
    config.validate()?;
    if trainable.uses_external_loader() {
        return Err(ScaleError::Configuration(
            "Batch size scaling requires a data loader rebuilt from the batch-size field; \
             an externally supplied loader cannot be resized"
                .to_string(),
        ));
    }
    if trainable.world_size() > 1 {
        return Err(ScaleError::Configuration(format!(
            "Batch size scaling is not supported with {} training processes",
            trainable.world_size()
        )));
    }
    if !trainable.loader_reads_field(&config.batch_arg_name) {
        return Err(ScaleError::Configuration(format!(
            "The data loader does not read its batch size from `{}`",
            config.batch_arg_name
        )));
    }

    let field = BatchSizeField::resolve(trainable, &config.batch_arg_name)?;
    let original = field.get(trainable)?;
    let (min, max) = config.probe_range(trainable.dataset_len())?;

    info!(
        mode = %config.mode,
        init = config.init_batch_size,
        max_trials = config.max_trials,
        field = field.name(),
        "starting batch size search"
    );

    let mut guard = RestoreGuard::new(trainable);
    let mut state = TrialState::new(config.mode, config.init_batch_size, min, max);

    let conclusion = loop {
        if state.trials() >= config.max_trials {
            break state.out_of_budget();
        }

        let size = state.current();
        let fits = run_trial(guard.target(), &field, size, config.steps_per_trial)?;

        match state.record(fits) {
            Step::Probe(next) if fits => {
                info!("Batch size {size} succeeded, trying batch size {next}");
            }
            Step::Probe(next) => {
                info!("Batch size {size} failed, trying batch size {next}");
            }
            Step::Finish(conclusion) => break conclusion,
        }
    };

    match conclusion {
        Conclusion::Infeasible => Err(ScaleError::SearchFailed {
            init_batch_size: config.init_batch_size,
            smallest_probed: state.smallest_probed().unwrap_or(min),
            trials: state.trials(),
        }),
        Conclusion::Found { batch_size, converged } => {
            let warning = (!converged).then(|| ScaleWarning::DidNotConverge {
                low: batch_size,
                high: state.bounds().high,
                trials: state.trials(),
            });
            guard.commit(&field, batch_size, original)?;

            if let Some(w) = &warning {
                warn!("{w}");
            }
            info!("Finished batch size search, using batch size {batch_size}");

            Ok(ScaleResult {
                batch_size,
                mode: config.mode,
                converged,
                trials: state.into_observations(),
                warning,
            })
        }
    }
}

/// Run one probe at `size`; `Ok(false)` means the device ran out of memory
fn run_trial<T: Trainable>(
    trainable: &mut T,
    field: &BatchSizeField,
    size: usize,
    steps: usize,
) -> Result<bool> {
    field.set(trainable, size)?;
    trainable
        .rebuild_data_loader()
        .map_err(|source| ScaleError::Loader { batch_size: size, source })?;

    let outcome = trainable.run_trial(steps);
    // Residue from this trial must not count against the next one
    trainable.reclaim_memory();

    match outcome {
        TrialOutcome::Fits => Ok(true),
        TrialOutcome::ResourceExhausted(reason) => {
            debug!(batch_size = size, %reason, "trial exhausted device memory");
            Ok(false)
        }
        TrialOutcome::Failed(source) => Err(ScaleError::Trial { batch_size: size, source }),
    }
}

/// Stateful front end to [`scale_batch_size`]
///
/// Holds the scale configuration and remembers the outcome of the last run.
#[derive(Debug, Clone, Default)]
pub struct Tuner {
    config: ScaleConfig,
    last: Option<ScaleResult>,
}

impl Tuner {
    pub fn new(config: ScaleConfig) -> Self {
        Self { config, last: None }
    }

    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Result of the most recent successful search
    pub fn last_result(&self) -> Option<&ScaleResult> {
        self.last.as_ref()
    }

    /// Batch size found by the most recent successful search
    pub fn batch_size(&self) -> Option<usize> {
        self.last.as_ref().map(|r| r.batch_size)
    }

    /// Run a search and remember its result
    pub fn scale_batch_size<T: Trainable>(&mut self, trainable: &mut T) -> Result<&ScaleResult> {
        let result = scale_batch_size(trainable, &self.config)?;
        Ok(self.last.insert(result))
    }
}
