//! Learning rate schedulers
//!
//! Scheduling policy is factored out of the trainer behind one trait so the
//! epoch loop never branches on policy type:
//! - `NoOpLR` - identity, the default when no scheduling is requested
//! - `StepDecayLR` - multiplies LR by a factor at each milestone epoch
//! - `WarmupLR` - linear ramp to a target, then hold or delegate
//! - `CosineAnnealingLR` - smooth cosine decay
//!
//! `step` is called exactly once per completed epoch, after validation, with
//! the epoch index and the validation metric. Epoch indices are assumed to be
//! monotonically increasing; calling out of order is not supported.

mod cosine_annealing;
mod noop;
mod step_decay;
mod warmup;


pub use cosine_annealing::CosineAnnealingLR;
pub use noop::NoOpLR;
pub use step_decay::StepDecayLR;
pub use warmup::WarmupLR;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainError};

/// Learning rate scheduler trait
pub trait LRScheduler: Send {
    /// Advance the schedule for a just-completed epoch and return the
    /// learning rate to use for the next one. Metric-agnostic schedulers
    /// ignore `metric`.
    fn step(&mut self, epoch: usize, metric: Option<f32>) -> f32;

    /// Current learning rate without advancing the schedule.
    fn lr(&self) -> f32;

    /// Scheduler name for logging
    fn name(&self) -> &'static str {
        "LRScheduler"
    }
}

/// Declarative scheduler selection, e.g. loaded from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleSpec {
    NoOp,
    StepDecay { milestones: Vec<usize>, factor: f32 },
    Warmup { warmup_epochs: usize },
    CosineAnnealing { t_max: usize, lr_min: f32 },
}

impl ScheduleSpec {
    /// Instantiate the scheduler this spec describes.
    pub fn build(&self, initial_lr: f32) -> Box<dyn LRScheduler> {
        build_scheduler(self, initial_lr)
    }
}

/// Build a scheduler from a spec and the optimizer's starting learning rate.
pub fn build_scheduler(spec: &ScheduleSpec, initial_lr: f32) -> Box<dyn LRScheduler> {
    match spec {
        ScheduleSpec::NoOp => Box::new(NoOpLR::new(initial_lr)),
        ScheduleSpec::StepDecay { milestones, factor } => {
            Box::new(StepDecayLR::new(initial_lr, milestones.clone(), *factor))
        }
        ScheduleSpec::Warmup { warmup_epochs } => {
            Box::new(WarmupLR::new(initial_lr, *warmup_epochs))
        }
        ScheduleSpec::CosineAnnealing { t_max, lr_min } => {
            Box::new(CosineAnnealingLR::new(initial_lr, *t_max, *lr_min))
        }
    }
}

impl FromStr for ScheduleSpec {
    type Err = TrainError;

    /// Parse compact scheme strings: `"none"`, `"step50_75"` (decay by 0.1 at
    /// epochs 50 and 75), `"warmup5"`, `"cosine100"`.
    fn from_str(s: &str) -> Result<Self> {
        if s == "none" || s == "noop" {
            return Ok(ScheduleSpec::NoOp);
        }
        if let Some(rest) = s.strip_prefix("step") {
            let milestones = rest
                .split('_')
                .map(|m| {
                    m.parse::<usize>().map_err(|_| {
                        TrainError::InvalidConfiguration(format!(
                            "bad milestone '{m}' in schedule scheme '{s}'"
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            if milestones.is_empty() {
                return Err(TrainError::InvalidConfiguration(format!(
                    "schedule scheme '{s}' has no milestones"
                )));
            }
            return Ok(ScheduleSpec::StepDecay {
                milestones,
                factor: 0.1,
            });
        }
        if let Some(rest) = s.strip_prefix("warmup") {
            let warmup_epochs = rest.parse::<usize>().map_err(|_| {
                TrainError::InvalidConfiguration(format!("bad warmup scheme '{s}'"))
            })?;
            return Ok(ScheduleSpec::Warmup { warmup_epochs });
        }
        if let Some(rest) = s.strip_prefix("cosine") {
            let t_max = rest.parse::<usize>().map_err(|_| {
                TrainError::InvalidConfiguration(format!("bad cosine scheme '{s}'"))
            })?;
            return Ok(ScheduleSpec::CosineAnnealing { t_max, lr_min: 0.0 });
        }
        Err(TrainError::InvalidConfiguration(format!(
            "unknown schedule scheme '{s}'"
        )))
    }
}
