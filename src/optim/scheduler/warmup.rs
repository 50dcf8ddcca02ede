//! Linear warmup learning rate scheduler

use super::LRScheduler;

/// Warmup Learning Rate Scheduler
///
/// Linearly ramps the learning rate from 0 to `target_lr` over
/// `warmup_epochs`, then holds the target, or delegates to a wrapped
/// scheduler if one was supplied.
///
/// Formula during warmup: `lr = target_lr * (epoch + 1) / warmup_epochs`
pub struct WarmupLR {
    target_lr: f32,
    warmup_epochs: usize,
    lr: f32,
    inner: Option<Box<dyn LRScheduler>>,
}

impl WarmupLR {
    /// Create a warmup scheduler that holds `target_lr` after the ramp.
    pub fn new(target_lr: f32, warmup_epochs: usize) -> Self {
        let lr = if warmup_epochs == 0 { target_lr } else { 0.0 };
        Self {
            target_lr,
            warmup_epochs,
            lr,
            inner: None,
        }
    }

    /// Delegate to `inner` once the warmup ramp has completed.
    pub fn with_inner(mut self, inner: Box<dyn LRScheduler>) -> Self {
        self.inner = Some(inner);
        self
    }
}

impl LRScheduler for WarmupLR {
    fn step(&mut self, epoch: usize, metric: Option<f32>) -> f32 {
        if epoch < self.warmup_epochs {
            let progress = (epoch + 1) as f32 / self.warmup_epochs as f32;
            self.lr = self.target_lr * progress;
        } else if let Some(inner) = self.inner.as_mut() {
            self.lr = inner.step(epoch, metric);
        } else {
            self.lr = self.target_lr;
        }
        self.lr
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn name(&self) -> &'static str {
        "WarmupLR"
    }
}
