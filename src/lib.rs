//! traincore: a small supervised-learning training controller
//!
//! Provides the orchestration layer of a training run and nothing more:
//! the model and the loss own their own mathematics, while `traincore`
//! drives the epoch loop, accumulates metrics, schedules the learning
//! rate, and decides when to stop.
//!
//! - [`train::Trainer`] runs the train/validate/schedule/stop cycle
//! - [`train::EarlyStopping`] is the patience-based stopping machine
//! - [`optim`] holds optimizers, gradient clipping, and LR schedules
//! - [`data`] holds batch types, dataset statistics, and normalization
//! - [`logger`] writes loss curves and run summaries to disk

pub mod data;
pub mod logger;
pub mod optim;
pub mod train;

mod device;
mod error;
mod model;
mod tensor;

pub use device::Device;
pub use error::{Phase, Result, TrainError};
pub use model::{Model, ModelState};
pub use tensor::Tensor;
