//! No-op learning rate scheduler

use super::LRScheduler;

/// Identity scheduler: the learning rate never changes.
///
/// Used as the default policy when no scheduling is requested, so the
/// trainer's epoch loop is uniform across all policies.
pub struct NoOpLR {
    lr: f32,
}

impl NoOpLR {
    /// Create a no-op scheduler holding `lr` forever.
    pub fn new(lr: f32) -> Self {
        Self { lr }
    }
}

impl LRScheduler for NoOpLR {
    fn step(&mut self, _epoch: usize, _metric: Option<f32>) -> f32 {
        self.lr
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn name(&self) -> &'static str {
        "NoOpLR"
    }
}
