//! Per-epoch loss accumulation

use crate::error::{Result, TrainError};

/// Reduces per-batch loss values into a per-epoch scalar.
///
/// Losses are weighted by batch size so a ragged final batch does not bias
/// the epoch metric. Must be reset (or freshly created) at the start of
/// every epoch.
#[derive(Debug, Clone, Default)]
pub struct MetricsAccumulator {
    weighted_sum: f64,
    total_weight: usize,
}

impl MetricsAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one batch's mean loss.
    pub fn add(&mut self, batch_loss: f32, batch_size: usize) {
        self.weighted_sum += f64::from(batch_loss) * batch_size as f64;
        self.total_weight += batch_size;
    }

    /// Size-weighted average loss since the last reset.
    ///
    /// Fails with `EmptyAccumulator` when no data has been added; that is a
    /// loop-sequencing bug and is never defaulted to zero.
    pub fn mean(&self) -> Result<f32> {
        if self.total_weight == 0 {
            return Err(TrainError::EmptyAccumulator);
        }
        Ok((self.weighted_sum / self.total_weight as f64) as f32)
    }

    /// Clear all accumulated state.
    pub fn reset(&mut self) {
        self.weighted_sum = 0.0;
        self.total_weight = 0;
    }

    /// Whether any data has been added since the last reset.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_mean_fails() {
        let acc = MetricsAccumulator::new();
        assert!(matches!(acc.mean(), Err(TrainError::EmptyAccumulator)));
    }

    #[test]
    fn test_weighted_mean() {
        let mut acc = MetricsAccumulator::new();
        acc.add(1.0, 4);
        acc.add(2.0, 1);
        // (1.0 * 4 + 2.0 * 1) / 5
        assert_abs_diff_eq!(acc.mean().unwrap(), 1.2, epsilon = 1e-6);
    }

    #[test]
    fn test_ragged_final_batch_not_biased() {
        let mut acc = MetricsAccumulator::new();
        // Three full batches at loss 0.0 and one single-sample batch at 1.0.
        acc.add(0.0, 32);
        acc.add(0.0, 32);
        acc.add(0.0, 32);
        acc.add(1.0, 1);
        assert_abs_diff_eq!(acc.mean().unwrap(), 1.0 / 97.0, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut acc = MetricsAccumulator::new();
        acc.add(1.0, 2);
        assert!(!acc.is_empty());

        acc.reset();
        assert!(acc.is_empty());
        assert!(matches!(acc.mean(), Err(TrainError::EmptyAccumulator)));
    }

    #[test]
    fn test_zero_sized_batches_count_as_empty() {
        let mut acc = MetricsAccumulator::new();
        acc.add(5.0, 0);
        assert!(acc.is_empty());
        assert!(acc.mean().is_err());
    }
}
