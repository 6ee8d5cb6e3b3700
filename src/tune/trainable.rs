//! The capability set the scaler needs from a trainer

use super::error::BoxError;
use super::hparams::HParams;
use std::fmt;

/// Result of one probe
pub enum TrialOutcome {
    /// Every step of the trial completed
    Fits,
    /// A step ran out of device memory
    ResourceExhausted(String),
    /// A step failed for any other reason
    Failed(BoxError),
}

impl TrialOutcome {
    pub fn fits(&self) -> bool {
        matches!(self, TrialOutcome::Fits)
    }
}

impl fmt::Debug for TrialOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialOutcome::Fits => write!(f, "Fits"),
            TrialOutcome::ResourceExhausted(reason) => {
                f.debug_tuple("ResourceExhausted").field(reason).finish()
            }
            TrialOutcome::Failed(err) => f.debug_tuple("Failed").field(&err.to_string()).finish(),
        }
    }
}

/// A trainer whose batch size can be searched
///
/// The batch size lives either in a top-level attribute or one level down in
/// [`HParams`]. The data loader must be rebuilt from that field, so
/// [`rebuild_data_loader`](Trainable::rebuild_data_loader) always reads
/// whatever value the scaler last wrote.
pub trait Trainable {
    /// Deep copy of everything a trial may mutate
    type Snapshot;

    /// Read a top-level integer attribute
    fn attribute(&self, name: &str) -> Option<usize>;

    /// Write a top-level integer attribute; `false` if no such attribute exists
    fn set_attribute(&mut self, name: &str, value: usize) -> bool;

    /// Nested hyperparameter holder, if the trainer has one
    fn hparams(&self) -> Option<&HParams> {
        None
    }

    fn hparams_mut(&mut self) -> Option<&mut HParams> {
        None
    }

    /// Number of samples in the training dataset, if known
    fn dataset_len(&self) -> Option<usize>;

    /// Rebuild the training data loader from the current batch-size field
    fn rebuild_data_loader(&mut self) -> Result<(), BoxError>;

    /// Run `steps` training steps at the current batch size
    fn run_trial(&mut self, steps: usize) -> TrialOutcome;

    /// Free whatever device memory a trial left behind
    fn reclaim_memory(&mut self) {}

    /// Capture state and detach side effects (callbacks, logging) for probing
    fn snapshot(&mut self) -> Self::Snapshot;

    /// Put back a snapshot taken by [`snapshot`](Trainable::snapshot)
    fn restore(&mut self, snapshot: Self::Snapshot);

    /// Whether batches come from a loader handed in from outside.
    /// Such loaders cannot be rebuilt from the batch-size field.
    fn uses_external_loader(&self) -> bool {
        false
    }

    /// Number of cooperating training processes
    fn world_size(&self) -> usize {
        1
    }

    /// Whether [`rebuild_data_loader`](Trainable::rebuild_data_loader) takes
    /// its batch size from the field called `name`
    fn loader_reads_field(&self, _name: &str) -> bool {
        true
    }
}
