//! Milestone step decay learning rate scheduler

use super::LRScheduler;

/// Step Decay Learning Rate Scheduler
///
/// Multiplies the learning rate by `factor` once at each milestone epoch.
/// Repeated `step` calls for the same epoch are idempotent; epoch indices
/// are assumed to be monotonically increasing.
pub struct StepDecayLR {
    lr: f32,
    milestones: Vec<usize>,
    factor: f32,
    /// Index of the first milestone not yet applied.
    next: usize,
}

impl StepDecayLR {
    /// Create a new step decay scheduler
    ///
    /// # Arguments
    /// * `initial_lr` - Starting learning rate
    /// * `milestones` - Epoch indices at which to decay (sorted internally)
    /// * `factor` - Multiplicative factor (e.g. 0.1 for 10x reduction)
    pub fn new(initial_lr: f32, mut milestones: Vec<usize>, factor: f32) -> Self {
        milestones.sort_unstable();
        milestones.dedup();
        Self {
            lr: initial_lr,
            milestones,
            factor,
            next: 0,
        }
    }
}

impl LRScheduler for StepDecayLR {
    fn step(&mut self, epoch: usize, _metric: Option<f32>) -> f32 {
        while self.next < self.milestones.len() && self.milestones[self.next] <= epoch {
            self.lr *= self.factor;
            self.next += 1;
        }
        self.lr
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn name(&self) -> &'static str {
        "StepDecayLR"
    }
}
