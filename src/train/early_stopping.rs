//! Early stopping state machine
//!
//! Tracks the best validation metric seen and a patience counter, and
//! decides whether the epoch loop should halt. Modelled as an explicit
//! three-state machine so the terminal-state and tie-break invariants are
//! checkable in isolation.

use crate::error::{Result, TrainError};

/// Observable state of the early stopping machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopState {
    /// The most recent update recorded a new best metric.
    Improving,
    /// One or more non-improving epochs, patience not yet exhausted.
    Plateau,
    /// Patience exhausted. Terminal: never left once entered.
    Stopped,
}

/// Early stopping policy over a monitored metric (lower is better).
///
/// An exact tie with the best metric (within `min_delta`) counts as no
/// improvement, which favors stopping sooner over oscillating.
///
/// # Example
///
/// ```
/// use traincore::train::EarlyStopping;
///
/// // Stop after 5 consecutive epochs without improving by at least 0.001.
/// let mut early_stop = EarlyStopping::new(5, 0.001).unwrap();
/// assert!(!early_stop.update(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct EarlyStopping {
    /// Consecutive non-improving epochs tolerated before stopping.
    patience: usize,
    /// Minimum improvement to reset patience.
    min_delta: f32,
    best_metric: f32,
    epochs_since_improvement: usize,
    state: StopState,
}

impl EarlyStopping {
    /// Create a new early stopping policy.
    ///
    /// `patience = 0` stops on the first non-improving epoch. `min_delta`
    /// must be finite and non-negative.
    pub fn new(patience: usize, min_delta: f32) -> Result<Self> {
        if !min_delta.is_finite() || min_delta < 0.0 {
            return Err(TrainError::InvalidConfiguration(format!(
                "min_delta must be finite and non-negative, got {min_delta}"
            )));
        }
        Ok(Self {
            patience,
            min_delta,
            best_metric: f32::INFINITY,
            epochs_since_improvement: 0,
            state: StopState::Improving,
        })
    }

    /// Feed one epoch's metric. Returns whether the caller should stop.
    ///
    /// Once `Stopped` is reached, every later call returns `true` without
    /// touching the recorded best.
    pub fn update(&mut self, candidate_metric: f32) -> bool {
        if self.state == StopState::Stopped {
            return true;
        }

        if candidate_metric < self.best_metric - self.min_delta {
            self.best_metric = candidate_metric;
            self.epochs_since_improvement = 0;
            self.state = StopState::Improving;
            return false;
        }

        self.epochs_since_improvement += 1;
        if self.epochs_since_improvement > self.patience {
            self.state = StopState::Stopped;
            true
        } else {
            self.state = StopState::Plateau;
            false
        }
    }

    /// Current machine state.
    pub fn state(&self) -> StopState {
        self.state
    }

    /// Best metric recorded so far (`+inf` before the first update).
    pub fn best_metric(&self) -> f32 {
        self.best_metric
    }

    /// Consecutive non-improving epochs since the last best.
    pub fn epochs_since_improvement(&self) -> usize {
        self.epochs_since_improvement
    }

    /// Reset to the initial state for a fresh run.
    pub fn reset(&mut self) {
        self.best_metric = f32::INFINITY;
        self.epochs_since_improvement = 0;
        self.state = StopState::Improving;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_improves() {
        let mut es = EarlyStopping::new(3, 0.001).unwrap();
        assert!(!es.update(1.0));
        assert_eq!(es.state(), StopState::Improving);
        assert_eq!(es.best_metric(), 1.0);
        assert_eq!(es.epochs_since_improvement(), 0);
    }

    #[test]
    fn test_stops_after_patience_exhausted() {
        let mut es = EarlyStopping::new(2, 0.0).unwrap();
        assert!(!es.update(1.0)); // best
        assert!(!es.update(1.0)); // plateau 1
        assert!(!es.update(1.0)); // plateau 2
        assert!(es.update(1.0)); // plateau 3 > patience
        assert_eq!(es.state(), StopState::Stopped);
    }

    #[test]
    fn test_zero_patience_stops_immediately() {
        let mut es = EarlyStopping::new(0, 0.0).unwrap();
        assert!(!es.update(1.0));
        assert!(es.update(1.0));
        assert_eq!(es.state(), StopState::Stopped);
    }

    #[test]
    fn test_improvement_resets_counter() {
        let mut es = EarlyStopping::new(2, 0.0).unwrap();
        es.update(1.0);
        es.update(1.0);
        assert_eq!(es.epochs_since_improvement(), 1);
        assert_eq!(es.state(), StopState::Plateau);

        assert!(!es.update(0.5));
        assert_eq!(es.epochs_since_improvement(), 0);
        assert_eq!(es.state(), StopState::Improving);
    }

    #[test]
    fn test_tie_counts_as_no_improvement() {
        let mut es = EarlyStopping::new(0, 0.0).unwrap();
        es.update(1.0);
        // Exactly equal to best: conservative, counts against patience.
        assert!(es.update(1.0));
    }

    #[test]
    fn test_min_delta_gates_improvement() {
        let mut es = EarlyStopping::new(1, 0.1).unwrap();
        es.update(1.0);
        // Improvement smaller than min_delta does not count.
        assert!(!es.update(0.95));
        assert_eq!(es.state(), StopState::Plateau);
        assert_eq!(es.best_metric(), 1.0);
        // A real improvement does.
        assert!(!es.update(0.8));
        assert_eq!(es.best_metric(), 0.8);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut es = EarlyStopping::new(0, 0.0).unwrap();
        es.update(1.0);
        assert!(es.update(1.0));
        // Even a huge improvement cannot leave the terminal state,
        // and the best metric stays frozen.
        assert!(es.update(0.0001));
        assert_eq!(es.state(), StopState::Stopped);
        assert_eq!(es.best_metric(), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut es = EarlyStopping::new(0, 0.0).unwrap();
        es.update(1.0);
        es.update(1.0);
        assert_eq!(es.state(), StopState::Stopped);

        es.reset();
        assert_eq!(es.state(), StopState::Improving);
        assert_eq!(es.best_metric(), f32::INFINITY);
        assert!(!es.update(2.0));
    }

    #[test]
    fn test_rejects_bad_min_delta() {
        assert!(EarlyStopping::new(3, -0.1).is_err());
        assert!(EarlyStopping::new(3, f32::NAN).is_err());
        assert!(EarlyStopping::new(3, f32::INFINITY).is_err());
    }
}
