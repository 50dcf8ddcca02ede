//! Optimizers, gradient clipping, and learning rate scheduling

mod clip;
mod optimizer;
mod scheduler;
mod sgd;

pub use clip::clip_grad_norm;
pub use optimizer::Optimizer;
pub use scheduler::{
    build_scheduler, CosineAnnealingLR, LRScheduler, NoOpLR, ScheduleSpec, StepDecayLR, WarmupLR,
};
pub use sgd::SGD;
