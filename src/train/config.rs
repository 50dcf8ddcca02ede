//! Training configuration and metrics tracking

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainError};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Consecutive non-improving epochs tolerated before early stopping.
    pub patience: usize,
    /// Minimum validation improvement to count as "better".
    pub min_delta: f32,
    /// Print training progress every N batches.
    pub log_interval: usize,
    /// Clip gradients to this global L2 norm, if set.
    pub max_grad_norm: Option<f32>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            patience: 10,
            min_delta: 0.0,
            log_interval: 10,
            max_grad_norm: None,
        }
    }
}

impl TrainConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the early stopping patience
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Set the minimum improvement delta
    pub fn with_min_delta(mut self, min_delta: f32) -> Self {
        self.min_delta = min_delta;
        self
    }

    /// Set the logging interval
    pub fn with_log_interval(mut self, log_interval: usize) -> Self {
        self.log_interval = log_interval;
        self
    }

    /// Enable gradient clipping
    pub fn with_grad_clip(mut self, max_norm: f32) -> Self {
        self.max_grad_norm = Some(max_norm);
        self
    }

    /// Parse a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TrainError::InvalidConfiguration(format!("bad config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.min_delta.is_finite() || self.min_delta < 0.0 {
            return Err(TrainError::InvalidConfiguration(format!(
                "min_delta must be finite and non-negative, got {}",
                self.min_delta
            )));
        }
        if self.log_interval == 0 {
            return Err(TrainError::InvalidConfiguration(
                "log_interval must be at least 1".to_string(),
            ));
        }
        if let Some(max_norm) = self.max_grad_norm {
            if !max_norm.is_finite() || max_norm <= 0.0 {
                return Err(TrainError::InvalidConfiguration(format!(
                    "max_grad_norm must be finite and positive, got {max_norm}"
                )));
            }
        }
        Ok(())
    }

    /// Key/value pairs for the summary file.
    pub fn summary_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("patience".to_string(), self.patience.to_string()),
            ("min_delta".to_string(), self.min_delta.to_string()),
            ("log_interval".to_string(), self.log_interval.to_string()),
            (
                "max_grad_norm".to_string(),
                self.max_grad_norm
                    .map_or_else(|| "none".to_string(), |v| v.to_string()),
            ),
        ]
    }
}

/// Tracks losses and learning rates across a training run
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    /// Completed epochs
    pub epoch: usize,
    /// Global step count
    pub steps: usize,
    /// Per-epoch training losses
    pub train_losses: Vec<f32>,
    /// Per-epoch validation losses
    pub val_losses: Vec<f32>,
    /// Learning rate at each epoch
    pub lrs: Vec<f32>,
}

impl MetricsTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one optimizer step
    pub fn increment_step(&mut self) {
        self.steps += 1;
    }

    /// Record a completed training epoch
    pub fn record_epoch(&mut self, train_loss: f32, lr: f32) {
        self.epoch += 1;
        self.train_losses.push(train_loss);
        self.lrs.push(lr);
    }

    /// Record a validation pass
    pub fn record_val_loss(&mut self, val_loss: f32) {
        self.val_losses.push(val_loss);
    }
}
