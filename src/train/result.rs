//! Training result types

use serde::{Deserialize, Serialize};

use crate::ModelState;

/// One completed epoch: immutable once appended to the history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// Epoch index (0-based)
    pub epoch: usize,
    /// Mean training loss over the epoch
    pub train_loss: f32,
    /// Mean validation loss over the epoch
    pub val_loss: f32,
}

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainResult {
    /// One record per completed epoch, in order.
    pub history: Vec<EpochRecord>,
    /// Epoch with the lowest validation loss (earliest on ties).
    pub best_epoch: usize,
    /// Validation loss at the best epoch.
    pub best_val_loss: f32,
    /// Parameter snapshot taken at the best epoch.
    pub best_state: ModelState,
    /// Whether early stopping terminated the run before `epochs`.
    pub stopped_early: bool,
    /// Total training time in seconds
    pub elapsed_secs: f64,
}

impl TrainResult {
    /// Number of completed epochs.
    pub fn final_epoch(&self) -> usize {
        self.history.len()
    }

    /// Training loss of the last completed epoch, if any.
    pub fn final_train_loss(&self) -> Option<f32> {
        self.history.last().map(|r| r.train_loss)
    }
}
