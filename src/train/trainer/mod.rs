//! Trainer abstraction for training loops
//!
//! A high-level `Trainer` that orchestrates the epoch loop:
//! - per-epoch training and validation passes
//! - learning rate scheduling between epochs
//! - early stopping on the validation metric
//! - divergence detection (non-finite losses are fatal)
//!
//! # Example
//!
//! ```no_run
//! use traincore::optim::SGD;
//! use traincore::train::{MSELoss, TrainConfig, Trainer};
//! use traincore::{Device, Model};
//!
//! # fn demo<M: Model>(model: M) -> traincore::Result<()> {
//! let config = TrainConfig::new().with_patience(5).with_min_delta(0.001);
//! let mut trainer = Trainer::new(
//!     model,
//!     Box::new(SGD::new(0.01, 0.0)),
//!     Box::new(MSELoss),
//!     Device::Cpu,
//!     config,
//! )?;
//!
//! // let result = trainer.run(|| train_batches.clone(), || val_batches.clone(), 100)?;
//! # Ok(())
//! # }
//! ```

mod core;
mod epoch;
mod run;

pub use self::core::Trainer;
