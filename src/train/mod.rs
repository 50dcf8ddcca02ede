//! Training loop infrastructure
//!
//! The pieces that make up a training run: loss accumulation, early
//! stopping, loss functions, configuration, run records, and the
//! [`Trainer`] that ties them together.

mod accumulator;
mod config;
mod early_stopping;
mod loss;
mod result;
mod trainer;

pub use accumulator::MetricsAccumulator;
pub use config::{MetricsTracker, TrainConfig};
pub use early_stopping::{EarlyStopping, StopState};
pub use loss::{L1Loss, LossFn, MSELoss};
pub use result::{EpochRecord, TrainResult};
pub use trainer::Trainer;
