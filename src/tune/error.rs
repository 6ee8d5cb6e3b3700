//! Batch-size scaling errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed error returned by trainable hooks
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Batch-size scaling errors
#[derive(Debug, Error)]
pub enum ScaleError {
    /// The trainable or the scale config cannot be searched as given.
    /// Always raised before the first trial.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No batch size fit within the trial budget
    #[error(
        "No feasible batch size found: started at {init_batch_size}, \
         smallest probed {smallest_probed} after {trials} trial(s)"
    )]
    SearchFailed { init_batch_size: usize, smallest_probed: usize, trials: usize },

    /// A trial failed for a reason other than resource exhaustion
    #[error("Trial at batch size {batch_size} failed: {source}")]
    Trial {
        batch_size: usize,
        #[source]
        source: BoxError,
    },

    /// Rebuilding the data loader failed
    #[error("Failed to rebuild data loader at batch size {batch_size}: {source}")]
    Loader {
        batch_size: usize,
        #[source]
        source: BoxError,
    },
}

/// Result type for scaling operations
pub type Result<T> = std::result::Result<T, ScaleError>;

/// Non-fatal outcome attached to a successful search
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ScaleWarning {
    /// The trial budget ran out before the feasible/infeasible boundary was pinned down
    #[error(
        "Search did not converge after {trials} trials: \
         best feasible {low}, upper bound {high:?}"
    )]
    DidNotConverge { low: usize, high: Option<usize>, trials: usize },
}
