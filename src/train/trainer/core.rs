//! Core Trainer struct and basic methods

use std::time::Instant;

use crate::error::Result;
use crate::optim::{LRScheduler, NoOpLR, Optimizer};
use crate::train::{EarlyStopping, LossFn, MetricsTracker, TrainConfig};
use crate::{Device, Model};

/// High-level trainer that orchestrates the epoch loop.
///
/// Owns the model, optimizer, scheduler, loss function, device descriptor,
/// and early stopping state. A `Trainer` is single-threaded: one `run` at a
/// time, never shared across concurrent training runs.
pub struct Trainer<M: Model> {
    pub(crate) model: M,
    pub(crate) optimizer: Box<dyn Optimizer>,
    pub(crate) scheduler: Box<dyn LRScheduler>,
    pub(crate) loss_fn: Box<dyn LossFn>,
    pub(crate) device: Device,
    pub(crate) early_stopping: EarlyStopping,
    pub(crate) config: TrainConfig,

    /// Metrics tracker
    pub metrics: MetricsTracker,

    pub(crate) start_time: Option<Instant>,
}

impl<M: Model> Trainer<M> {
    /// Create a new trainer with a no-op schedule.
    ///
    /// Early stopping is constructed from `config` (`patience`,
    /// `min_delta`); use [`Trainer::with_early_stopping`] to inject a
    /// preconfigured machine instead.
    pub fn new(
        model: M,
        optimizer: Box<dyn Optimizer>,
        loss_fn: Box<dyn LossFn>,
        device: Device,
        config: TrainConfig,
    ) -> Result<Self> {
        config.validate()?;
        let early_stopping = EarlyStopping::new(config.patience, config.min_delta)?;
        let scheduler = Box::new(NoOpLR::new(optimizer.lr()));
        Ok(Self {
            model,
            optimizer,
            scheduler,
            loss_fn,
            device,
            early_stopping,
            config,
            metrics: MetricsTracker::new(),
            start_time: None,
        })
    }

    /// Replace the no-op schedule with a real one.
    pub fn with_scheduler(mut self, scheduler: Box<dyn LRScheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Inject a preconfigured early stopping machine.
    pub fn with_early_stopping(mut self, early_stopping: EarlyStopping) -> Self {
        self.early_stopping = early_stopping;
        self
    }

    /// Get current learning rate
    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    /// Set learning rate
    pub fn set_lr(&mut self, lr: f32) {
        self.optimizer.set_lr(lr);
    }

    /// Reference to the model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable reference to the model
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consume the trainer and return the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// The device descriptor this trainer was constructed with.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Current early stopping state.
    pub fn early_stopping(&self) -> &EarlyStopping {
        &self.early_stopping
    }

    /// The active configuration.
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::{ScheduleSpec, SGD};
    use crate::train::{MSELoss, StopState};
    use crate::Tensor;
    use ndarray::Array1;

    struct Identity {
        params: Vec<Tensor>,
    }

    impl Identity {
        fn new() -> Self {
            Self {
                params: vec![Tensor::from_vec(vec![1.0], true)],
            }
        }
    }

    impl Model for Identity {
        fn forward(&self, inputs: &Tensor) -> Tensor {
            Tensor::from_vec(inputs.to_vec(), false)
        }

        fn backward(&mut self, _inputs: &Tensor, _grad_output: &Array1<f32>) {}

        fn params(&self) -> &[Tensor] {
            &self.params
        }

        fn params_mut(&mut self) -> &mut [Tensor] {
            &mut self.params
        }
    }

    #[test]
    fn test_trainer_creation() {
        let trainer = Trainer::new(
            Identity::new(),
            Box::new(SGD::new(0.001, 0.0)),
            Box::new(MSELoss),
            Device::Cpu,
            TrainConfig::default(),
        )
        .unwrap();

        assert_eq!(trainer.lr(), 0.001);
        assert_eq!(trainer.device(), &Device::Cpu);
        assert_eq!(trainer.early_stopping().state(), StopState::Improving);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let result = Trainer::new(
            Identity::new(),
            Box::new(SGD::new(0.001, 0.0)),
            Box::new(MSELoss),
            Device::Cpu,
            TrainConfig::new().with_min_delta(-0.5),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_set_lr() {
        let mut trainer = Trainer::new(
            Identity::new(),
            Box::new(SGD::new(0.001, 0.0)),
            Box::new(MSELoss),
            Device::Cpu,
            TrainConfig::default(),
        )
        .unwrap();

        trainer.set_lr(0.01);
        assert_eq!(trainer.lr(), 0.01);
    }

    #[test]
    fn test_with_scheduler() {
        let spec = ScheduleSpec::StepDecay {
            milestones: vec![1],
            factor: 0.1,
        };
        let trainer = Trainer::new(
            Identity::new(),
            Box::new(SGD::new(0.1, 0.0)),
            Box::new(MSELoss),
            Device::Cpu,
            TrainConfig::default(),
        )
        .unwrap()
        .with_scheduler(spec.build(0.1));

        assert_eq!(trainer.scheduler.name(), "StepDecayLR");
    }

    #[test]
    fn test_into_model() {
        let trainer = Trainer::new(
            Identity::new(),
            Box::new(SGD::new(0.001, 0.0)),
            Box::new(MSELoss),
            Device::Cpu,
            TrainConfig::default(),
        )
        .unwrap();

        let model = trainer.into_model();
        assert_eq!(model.params().len(), 1);
    }
}
