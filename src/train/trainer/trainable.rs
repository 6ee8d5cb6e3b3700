//! Batch-size scaler integration

use super::core::{Trainer, TrainerState};
use crate::train::callback::CallbackManager;
use crate::train::{Batch, DataLoader, TrainError};
use crate::tune::{BoxError, HParams, Trainable, TrialOutcome, DEFAULT_BATCH_ARG_NAME};
use std::mem;
use tracing::debug;

/// State held aside while the scaler runs trials
///
/// Callbacks are moved out rather than copied, so they stay detached until
/// the snapshot is restored.
#[derive(Debug)]
pub struct TrainerSnapshot {
    state: TrainerState,
    callbacks: CallbackManager,
    loader: Option<DataLoader>,
}

impl Trainable for Trainer {
    type Snapshot = TrainerSnapshot;

    fn attribute(&self, name: &str) -> Option<usize> {
        match name {
            DEFAULT_BATCH_ARG_NAME => self.config_batch_size(),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: usize) -> bool {
        match name {
            DEFAULT_BATCH_ARG_NAME if self.config_batch_size().is_some() => {
                self.config.batch_size = Some(value);
                true
            }
            _ => false,
        }
    }

    fn hparams(&self) -> Option<&HParams> {
        self.hparams.as_ref()
    }

    fn hparams_mut(&mut self) -> Option<&mut HParams> {
        self.hparams.as_mut()
    }

    fn dataset_len(&self) -> Option<usize> {
        Some(self.dataset.len())
    }

    fn rebuild_data_loader(&mut self) -> Result<(), BoxError> {
        self.rebuild_loader().map_err(BoxError::from)
    }

    fn run_trial(&mut self, steps: usize) -> TrialOutcome {
        let Some(loader) = self.loader.as_ref() else {
            return TrialOutcome::Failed(Box::new(TrainError::NoDataLoader));
        };
        let batches: Vec<Batch> = loader.iter(0).take(steps).collect();
        if batches.is_empty() {
            return TrialOutcome::Failed(Box::new(TrainError::EmptyDataset));
        }
        debug!(batch_size = loader.batch_size(), steps, "running trial");

        for batch in batches.iter().cycle().take(steps) {
            match self.train_step(batch) {
                Ok(_) => {}
                Err(e) if e.is_resource_exhausted() => {
                    return TrialOutcome::ResourceExhausted(e.to_string());
                }
                Err(e) => return TrialOutcome::Failed(Box::new(e)),
            }
        }
        TrialOutcome::Fits
    }

    fn reclaim_memory(&mut self) {
        self.device.reclaim();
    }

    fn snapshot(&mut self) -> TrainerSnapshot {
        TrainerSnapshot {
            state: self.state(),
            callbacks: mem::take(&mut self.callbacks),
            loader: self.loader.clone(),
        }
    }

    fn restore(&mut self, snapshot: TrainerSnapshot) {
        self.load_state(snapshot.state);
        self.callbacks = snapshot.callbacks;
        self.loader = snapshot.loader;
    }

    fn uses_external_loader(&self) -> bool {
        self.external_loader
    }

    fn world_size(&self) -> usize {
        self.world_size
    }

    fn loader_reads_field(&self, name: &str) -> bool {
        name == self.batch_arg_name
    }
}
