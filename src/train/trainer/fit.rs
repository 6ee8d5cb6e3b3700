//! Multi-epoch training loop

use super::core::Trainer;
use super::result::TrainResult;
use crate::train::callback::CallbackAction;
use crate::train::{Batch, DataLoader, TrainError};
use crate::tune::{scale_batch_size, ScaleConfig};
use std::time::Instant;
use tracing::info;

impl Trainer {
    /// Train for `max_epochs` epochs with full callback support
    ///
    /// When `auto_scale_batch_size` is set the batch-size search runs first,
    /// using [`scale_config`](Self::scale_config) with the configured mode,
    /// and training continues with the discovered size.
    ///
    /// # Errors
    ///
    /// Propagates scaler failures as [`TrainError::Scale`] and device or
    /// loader failures from the training steps.
    pub fn fit(&mut self, max_epochs: usize) -> Result<TrainResult, TrainError> {
        let scale = match self.config.auto_scale_batch_size {
            Some(mode) => {
                info!(%mode, "scaling batch size before training");
                let config = ScaleConfig { mode, ..self.scale_config.clone() };
                Some(scale_batch_size(self, &config)?)
            }
            None => None,
        };
        if self.loader.is_none() {
            self.rebuild_loader()?;
        }
        let batch_size = self.loader.as_ref().map_or(0, DataLoader::batch_size);

        let start = Instant::now();
        self.start_time = Some(start);
        self.best_loss = None;
        let mut stopped_early = false;
        let mut final_loss = 0.0;

        let ctx = self.build_context(0, max_epochs, 0, 0, 0.0);
        if self.callbacks.on_train_begin(&ctx) == CallbackAction::Stop {
            return Ok(TrainResult {
                final_epoch: 0,
                final_loss: 0.0,
                best_loss: 0.0,
                stopped_early: true,
                elapsed_secs: start.elapsed().as_secs_f64(),
                batch_size,
                scale,
            });
        }

        for epoch in 0..max_epochs {
            let ctx = self.build_context(epoch, max_epochs, 0, 0, final_loss);
            match self.callbacks.on_epoch_begin(&ctx) {
                CallbackAction::Stop => {
                    stopped_early = true;
                    break;
                }
                CallbackAction::SkipEpoch => continue,
                CallbackAction::Continue => {}
            }

            let batches: Vec<Batch> = self
                .loader
                .as_ref()
                .ok_or(TrainError::NoDataLoader)?
                .iter(epoch as u64)
                .collect();
            let steps_per_epoch = batches.len();

            let mut total_loss = 0.0;
            let mut num_batches = 0;
            let accum_steps = self.config.gradient_accumulation_steps.max(1);

            for (step, batch) in batches.iter().enumerate() {
                let ctx = self.build_context(epoch, max_epochs, step, steps_per_epoch, final_loss);
                if self.callbacks.on_step_begin(&ctx) == CallbackAction::Stop {
                    stopped_early = true;
                    break;
                }

                // Zero gradients at start of accumulation window
                if step % accum_steps == 0 {
                    self.optimizer.zero_grad(&mut self.params);
                }

                let loss = self.accumulate_gradients(batch)?;
                total_loss += loss;
                num_batches += 1;

                // Optimizer step at end of accumulation window (or last batch)
                let is_accum_boundary = (step + 1) % accum_steps == 0;
                let is_last_batch = step + 1 == steps_per_epoch;
                if is_accum_boundary || is_last_batch {
                    self.apply_gradients();
                }

                self.metrics.increment_step();

                let ctx = self.build_context(epoch, max_epochs, step, steps_per_epoch, loss);
                if self.callbacks.on_step_end(&ctx) == CallbackAction::Stop {
                    stopped_early = true;
                    break;
                }
            }

            if stopped_early {
                break;
            }

            let avg_loss = if num_batches > 0 { total_loss / num_batches as f32 } else { 0.0 };
            final_loss = avg_loss;
            self.best_loss = Some(self.best_loss.map_or(avg_loss, |best| best.min(avg_loss)));
            self.metrics.record_epoch(avg_loss, self.lr());

            let ctx =
                self.build_context(epoch, max_epochs, steps_per_epoch, steps_per_epoch, avg_loss);
            if self.callbacks.on_epoch_end(&ctx) == CallbackAction::Stop {
                stopped_early = true;
                break;
            }
        }

        let ctx = self.build_context(self.metrics.epoch, max_epochs, 0, 0, final_loss);
        self.callbacks.on_train_end(&ctx);

        Ok(TrainResult {
            final_epoch: self.metrics.epoch,
            final_loss,
            best_loss: self.best_loss.unwrap_or(final_loss),
            stopped_early,
            elapsed_secs: start.elapsed().as_secs_f64(),
            batch_size,
            scale,
        })
    }
}
