//! Error types for the traincore crate

use thiserror::Error;

use crate::train::EpochRecord;

/// Which loss pass produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Train,
    Validation,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Train => write!(f, "training"),
            Phase::Validation => write!(f, "validation"),
        }
    }
}

/// Main error type for the traincore crate
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainError {
    /// Malformed construction arguments. Surfaced immediately, never recovered.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `mean()` requested before any batch was accumulated. Indicates a bug in
    /// loop sequencing and is never silently defaulted to zero.
    #[error("mean requested from an empty accumulator")]
    EmptyAccumulator,

    /// A non-finite loss was produced. Fatal: the run is aborted and the
    /// completed epoch records are attached for partial-progress reporting.
    #[error("training diverged: non-finite {phase} loss at epoch {epoch}")]
    Diverged {
        epoch: usize,
        phase: Phase,
        history: Vec<EpochRecord>,
    },
}

impl TrainError {
    /// Last completed epoch record, if this error carries a partial history.
    pub fn last_valid_record(&self) -> Option<&EpochRecord> {
        match self {
            TrainError::Diverged { history, .. } => history.last(),
            _ => None,
        }
    }

    /// Pin a divergence error to a run-local epoch index.
    ///
    /// The epoch passes tag errors with the trainer's cumulative epoch
    /// counter; a run loop rebases that onto its own 0-based index so the
    /// error agrees with the history it carries.
    pub(crate) fn at_epoch(self, epoch: usize) -> Self {
        match self {
            TrainError::Diverged { phase, history, .. } => TrainError::Diverged {
                epoch,
                phase,
                history,
            },
            other => other,
        }
    }

    /// Attach the completed epoch history to a divergence error.
    pub(crate) fn with_history(self, history: &[EpochRecord]) -> Self {
        match self {
            TrainError::Diverged { epoch, phase, .. } => TrainError::Diverged {
                epoch,
                phase,
                history: history.to_vec(),
            },
            other => other,
        }
    }
}

/// Result type for traincore operations
pub type Result<T> = std::result::Result<T, TrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrainError::InvalidConfiguration("epochs must be positive".to_string());
        assert!(format!("{err}").contains("invalid configuration"));

        let err = TrainError::EmptyAccumulator;
        assert!(format!("{err}").contains("empty accumulator"));

        let err = TrainError::Diverged {
            epoch: 3,
            phase: Phase::Train,
            history: vec![],
        };
        let msg = format!("{err}");
        assert!(msg.contains("training loss"));
        assert!(msg.contains("epoch 3"));
    }

    #[test]
    fn test_last_valid_record() {
        let record = EpochRecord {
            epoch: 0,
            train_loss: 0.5,
            val_loss: 0.6,
        };
        let err = TrainError::Diverged {
            epoch: 1,
            phase: Phase::Validation,
            history: vec![record],
        };
        assert_eq!(err.last_valid_record().unwrap().epoch, 0);

        assert!(TrainError::EmptyAccumulator.last_valid_record().is_none());
    }

    #[test]
    fn test_at_epoch_rebases_diverged() {
        let err = TrainError::Diverged {
            epoch: 7,
            phase: Phase::Train,
            history: vec![],
        }
        .at_epoch(0);
        assert!(matches!(err, TrainError::Diverged { epoch: 0, .. }));

        let err = TrainError::EmptyAccumulator.at_epoch(3);
        assert!(matches!(err, TrainError::EmptyAccumulator));
    }

    #[test]
    fn test_with_history_only_touches_diverged() {
        let history = vec![EpochRecord {
            epoch: 0,
            train_loss: 1.0,
            val_loss: 1.0,
        }];

        let err = TrainError::Diverged {
            epoch: 1,
            phase: Phase::Train,
            history: vec![],
        }
        .with_history(&history);
        assert_eq!(err.last_valid_record().unwrap().epoch, 0);

        let err = TrainError::EmptyAccumulator.with_history(&history);
        assert!(matches!(err, TrainError::EmptyAccumulator));
    }
}
