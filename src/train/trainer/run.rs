//! The full training loop

use std::time::Instant;

use crate::data::Batch;
use crate::error::{Result, TrainError};
use crate::train::{EpochRecord, TrainResult};
use crate::Model;

use super::Trainer;

impl<M: Model> Trainer<M> {
    /// Train for up to `epochs` epochs with per-epoch validation.
    ///
    /// The loaders are called once per epoch to produce a fresh batch
    /// stream. Each epoch runs train, then validation, then one scheduler
    /// step fed the validation loss; the returned learning rate is applied
    /// to the optimizer for the next epoch. Early stopping watches the
    /// validation loss and may end the run before `epochs`.
    ///
    /// On divergence the error carries the history of every epoch that
    /// completed before the failure.
    pub fn run<TF, TI, VF, VI>(
        &mut self,
        train_loader: TF,
        val_loader: VF,
        epochs: usize,
    ) -> Result<TrainResult>
    where
        TF: Fn() -> TI,
        TI: IntoIterator<Item = Batch>,
        VF: Fn() -> VI,
        VI: IntoIterator<Item = Batch>,
    {
        if epochs == 0 {
            return Err(TrainError::InvalidConfiguration(
                "epochs must be at least 1".to_string(),
            ));
        }

        self.early_stopping.reset();
        self.start_time = Some(Instant::now());

        let mut history: Vec<EpochRecord> = Vec::with_capacity(epochs);
        let mut best_epoch = 0;
        let mut best_val_loss = f32::INFINITY;
        let mut best_state = self.model.state();
        let mut stopped_early = false;

        for epoch in 0..epochs {
            let lr_used = self.optimizer.lr();

            let train_loss = self
                .train_one_epoch(train_loader())
                .map_err(|e| e.at_epoch(epoch).with_history(&history))?;
            let val_loss = self
                .validate_one_epoch(val_loader())
                .map_err(|e| e.at_epoch(epoch).with_history(&history))?;

            self.metrics.record_epoch(train_loss, lr_used);
            self.metrics.record_val_loss(val_loss);
            history.push(EpochRecord {
                epoch,
                train_loss,
                val_loss,
            });

            let next_lr = self.scheduler.step(epoch, Some(val_loss));
            self.optimizer.set_lr(next_lr);

            // Strict comparison keeps the earliest epoch on ties.
            if val_loss < best_val_loss {
                best_val_loss = val_loss;
                best_epoch = epoch;
                best_state = self.model.state();
            }

            println!(
                "epoch {} | train {:.6} | val {:.6} | lr {:.6}",
                epoch, train_loss, val_loss, lr_used
            );

            if self.early_stopping.update(val_loss) {
                stopped_early = true;
                break;
            }
        }

        let elapsed_secs = self
            .start_time
            .map_or(0.0, |start| start.elapsed().as_secs_f64());

        Ok(TrainResult {
            history,
            best_epoch,
            best_val_loss,
            best_state,
            stopped_early,
            elapsed_secs,
        })
    }
}
