//! Core Trainer struct and basic methods

use crate::device::DeviceMemory;
use crate::optim::{Optimizer, OptimizerState};
use crate::train::callback::{CallbackContext, CallbackManager, TrainerCallback};
use crate::train::{
    DataLoader, DataLoaderConfig, Dataset, LinearModel, MetricsTracker, TrainConfig, TrainError,
};
use crate::tune::{HParams, ParamValue, ScaleConfig, DEFAULT_BATCH_ARG_NAME};
use crate::Tensor;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Everything a training step or epoch mutates
///
/// Two trainers with equal state produce identical training runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerState {
    pub params: Vec<Tensor>,
    pub optimizer: OptimizerState,
    pub config: TrainConfig,
    pub hparams: Option<HParams>,
    pub metrics: MetricsTracker,
    pub best_loss: Option<f32>,
}

/// High-level trainer that orchestrates the training loop
///
/// # Example
///
/// ```no_run
/// use autobatch::device::DeviceMemory;
/// use autobatch::optim::SGD;
/// use autobatch::train::{Dataset, TrainConfig, Trainer};
/// use std::sync::Arc;
///
/// let dataset = Arc::new(Dataset::synthetic_linear(256, 4, 1));
/// let config = TrainConfig::default().with_batch_size(16);
/// let optimizer = Box::new(SGD::new(0.05, 0.9));
/// let mut trainer = Trainer::new(dataset, optimizer, config, DeviceMemory::new(1 << 16))?;
///
/// let result = trainer.fit(3)?;
/// println!("final loss {:.4}", result.final_loss);
/// # Ok::<(), autobatch::train::TrainError>(())
/// ```
pub struct Trainer {
    /// Model parameters: weights and bias
    pub(crate) params: Vec<Tensor>,

    /// Optimizer
    pub(crate) optimizer: Box<dyn Optimizer>,

    pub(crate) model: LinearModel,

    /// Training configuration
    pub(crate) config: TrainConfig,

    /// Metrics tracker
    pub metrics: MetricsTracker,

    /// Callback manager
    pub(crate) callbacks: CallbackManager,

    /// Free-form hyperparameters; may hold the batch size
    pub(crate) hparams: Option<HParams>,

    pub(crate) dataset: Arc<Dataset>,

    /// Current data loader, rebuilt whenever the batch size changes
    pub(crate) loader: Option<DataLoader>,

    /// Set when the loader was handed in and cannot be rebuilt
    pub(crate) external_loader: bool,

    /// Device memory pool
    pub(crate) device: DeviceMemory,

    /// Scaler settings used when `auto_scale_batch_size` is set
    pub(crate) scale_config: ScaleConfig,

    /// Name the batch size is read under, at the top level or in `hparams`
    pub(crate) batch_arg_name: String,

    /// Number of training processes
    pub(crate) world_size: usize,

    /// Best loss achieved during training
    pub(crate) best_loss: Option<f32>,

    /// Training start time
    pub(crate) start_time: Option<Instant>,
}

impl Trainer {
    /// Create a new trainer
    ///
    /// Parameters and their gradients are reserved on the device up front.
    /// The data loader is built immediately when a batch size is configured.
    pub fn new(
        dataset: Arc<Dataset>,
        optimizer: Box<dyn Optimizer>,
        config: TrainConfig,
        mut device: DeviceMemory,
    ) -> Result<Self, TrainError> {
        if dataset.is_empty() {
            return Err(TrainError::EmptyDataset);
        }
        let model = LinearModel::new(dataset.features());
        let params = model.init_params();
        let param_bytes: usize = params.iter().map(Tensor::size_bytes).sum();
        device.reserve_persistent(2 * param_bytes)?;

        let mut trainer = Self {
            params,
            optimizer,
            model,
            config,
            metrics: MetricsTracker::new(),
            callbacks: CallbackManager::new(),
            hparams: None,
            dataset,
            loader: None,
            external_loader: false,
            device,
            scale_config: ScaleConfig::default(),
            batch_arg_name: DEFAULT_BATCH_ARG_NAME.to_string(),
            world_size: 1,
            best_loss: None,
            start_time: None,
        };
        if trainer.batch_size().is_some() {
            trainer.rebuild_loader()?;
        }
        Ok(trainer)
    }

    /// Attach hyperparameters, rebuilding the loader if they carry the batch size
    pub fn set_hparams(&mut self, hparams: HParams) -> Result<(), TrainError> {
        self.hparams = Some(hparams);
        if !self.external_loader && self.batch_size().is_some() {
            self.rebuild_loader()?;
        }
        Ok(())
    }

    pub fn hparams(&self) -> Option<&HParams> {
        self.hparams.as_ref()
    }

    /// Add a callback to the trainer
    pub fn add_callback<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    /// Get current learning rate
    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    /// Set learning rate
    pub fn set_lr(&mut self, lr: f32) {
        self.optimizer.set_lr(lr);
    }

    /// Get reference to model parameters
    pub fn params(&self) -> &[Tensor] {
        &self.params
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Get reference to callback manager
    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    pub fn device(&self) -> &DeviceMemory {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut DeviceMemory {
        &mut self.device
    }

    pub fn data_loader(&self) -> Option<&DataLoader> {
        self.loader.as_ref()
    }

    /// Configured batch size
    ///
    /// Under the default name the config field wins, then `hparams["batch_size"]`.
    /// A custom [`batch_arg_name`](Self::batch_arg_name) is only looked up in
    /// `hparams`, since the config field is always called `batch_size`.
    pub fn batch_size(&self) -> Option<usize> {
        self.config_batch_size().or_else(|| {
            self.hparams
                .as_ref()
                .and_then(|h| h.get(&self.batch_arg_name))
                .and_then(ParamValue::as_int)
                .and_then(|v| usize::try_from(v).ok())
        })
    }

    /// The top-level batch size, when it is stored under the configured name
    pub(crate) fn config_batch_size(&self) -> Option<usize> {
        if self.batch_arg_name == DEFAULT_BATCH_ARG_NAME {
            self.config.batch_size
        } else {
            None
        }
    }

    pub fn batch_arg_name(&self) -> &str {
        &self.batch_arg_name
    }

    /// Rebuild the data loader from the current batch size
    pub fn rebuild_loader(&mut self) -> Result<(), TrainError> {
        if self.external_loader {
            return Err(TrainError::ExternalLoader);
        }
        let batch_size = self.batch_size().ok_or(TrainError::MissingBatchSize)?;
        if batch_size == 0 {
            return Err(TrainError::InvalidBatchSize(0));
        }

        let config = DataLoaderConfig::new()
            .with_batch_size(batch_size)
            .with_shuffle(self.config.shuffle)
            .with_drop_last(self.config.drop_last)
            .with_seed(self.config.seed);
        let loader = DataLoader::new(Arc::clone(&self.dataset), config);
        debug!(batch_size, batches = loader.num_batches(), "rebuilt data loader");
        self.loader = Some(loader);
        Ok(())
    }

    /// Use a caller-built loader; the batch size can no longer be scaled
    pub fn set_external_loader(&mut self, loader: DataLoader) {
        self.loader = Some(loader);
        self.external_loader = true;
    }

    /// Settings for the automatic batch-size search run by [`fit`](Self::fit)
    ///
    /// The config's `batch_arg_name` also becomes the name the loader reads
    /// its batch size from. Call this before [`set_hparams`](Self::set_hparams)
    /// when the batch size lives under a custom name.
    pub fn set_scale_config(&mut self, config: ScaleConfig) {
        self.batch_arg_name.clone_from(&config.batch_arg_name);
        self.scale_config = config;
    }

    pub fn scale_config(&self) -> &ScaleConfig {
        &self.scale_config
    }

    /// Declare the number of training processes
    pub fn set_world_size(&mut self, world_size: usize) {
        self.world_size = world_size.max(1);
    }

    /// Device bytes a single training step needs at `batch_size`
    ///
    /// A step holds an activation buffer and a gradient buffer of equal size.
    pub fn step_memory_bytes(&self, batch_size: usize) -> usize {
        2 * batch_size * (self.model.features() + 1) * std::mem::size_of::<f32>()
    }

    /// Copy of all mutable training state
    pub fn state(&self) -> TrainerState {
        TrainerState {
            params: self.params.clone(),
            optimizer: self.optimizer.state(),
            config: self.config.clone(),
            hparams: self.hparams.clone(),
            metrics: self.metrics.clone(),
            best_loss: self.best_loss,
        }
    }

    /// Replace all mutable training state
    pub fn load_state(&mut self, state: TrainerState) {
        self.params = state.params;
        self.optimizer.load_state(state.optimizer);
        self.config = state.config;
        self.hparams = state.hparams;
        self.metrics = state.metrics;
        self.best_loss = state.best_loss;
    }

    /// Build callback context from current state
    pub(crate) fn build_context(
        &self,
        epoch: usize,
        max_epochs: usize,
        step: usize,
        steps_per_epoch: usize,
        loss: f32,
    ) -> CallbackContext {
        CallbackContext {
            epoch,
            max_epochs,
            step,
            steps_per_epoch,
            global_step: self.metrics.steps,
            batch_size: self.loader.as_ref().map_or(0, DataLoader::batch_size),
            loss,
            lr: self.lr(),
            best_loss: self.best_loss,
            elapsed_secs: self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64()),
        }
    }
}
