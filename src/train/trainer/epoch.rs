//! Per-epoch training and validation passes

use crate::data::Batch;
use crate::error::{Phase, Result, TrainError};
use crate::optim::clip_grad_norm;
use crate::train::MetricsAccumulator;
use crate::Model;

use super::Trainer;

impl<M: Model> Trainer<M> {
    /// Run one training epoch, returning the sample-weighted mean loss.
    ///
    /// For each batch: forward, loss, backward, optional gradient clipping,
    /// optimizer step. A non-finite batch loss aborts the epoch with
    /// [`TrainError::Diverged`] before any weight update for that batch.
    pub fn train_one_epoch<I>(&mut self, batches: I) -> Result<f32>
    where
        I: IntoIterator<Item = Batch>,
    {
        let mut accumulator = MetricsAccumulator::new();

        for (batch_idx, batch) in batches.into_iter().enumerate() {
            self.optimizer.zero_grad(self.model.params_mut());

            let predictions = self.model.forward(&batch.inputs);
            let loss = self.loss_fn.forward(&predictions, &batch.targets);
            if !loss.is_finite() {
                return Err(TrainError::Diverged {
                    epoch: self.metrics.epoch,
                    phase: Phase::Train,
                    history: Vec::new(),
                });
            }

            let grad_output = self.loss_fn.backward(&predictions, &batch.targets);
            self.model.backward(&batch.inputs, &grad_output);

            if let Some(max_norm) = self.config.max_grad_norm {
                clip_grad_norm(self.model.params_mut(), max_norm);
            }

            self.optimizer.step(self.model.params_mut());
            self.metrics.increment_step();
            accumulator.add(loss, batch.size());

            if (batch_idx + 1) % self.config.log_interval == 0 {
                println!(
                    "epoch {} | batch {} | loss {:.6} | lr {:.6}",
                    self.metrics.epoch,
                    batch_idx + 1,
                    loss,
                    self.optimizer.lr()
                );
            }
        }

        accumulator.mean()
    }

    /// Run one validation epoch, returning the sample-weighted mean loss.
    ///
    /// Forward-only: no gradients are produced and no weights change.
    pub fn validate_one_epoch<I>(&mut self, batches: I) -> Result<f32>
    where
        I: IntoIterator<Item = Batch>,
    {
        let mut accumulator = MetricsAccumulator::new();

        for batch in batches {
            let predictions = self.model.forward(&batch.inputs);
            let loss = self.loss_fn.forward(&predictions, &batch.targets);
            if !loss.is_finite() {
                return Err(TrainError::Diverged {
                    epoch: self.metrics.epoch,
                    phase: Phase::Validation,
                    history: Vec::new(),
                });
            }
            accumulator.add(loss, batch.size());
        }

        accumulator.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::SGD;
    use crate::train::{MSELoss, TrainConfig};
    use crate::{Device, Tensor};
    use ndarray::Array1;

    /// y = w * x, one learnable scalar.
    struct Scale {
        params: Vec<Tensor>,
    }

    impl Scale {
        fn new(w: f32) -> Self {
            Self {
                params: vec![Tensor::from_vec(vec![w], true)],
            }
        }

        fn w(&self) -> f32 {
            self.params[0].data()[0]
        }
    }

    impl Model for Scale {
        fn forward(&self, inputs: &Tensor) -> Tensor {
            let w = self.w();
            let out: Vec<f32> = inputs.data().iter().map(|x| w * x).collect();
            Tensor::from_vec(out, false)
        }

        fn backward(&mut self, inputs: &Tensor, grad_output: &Array1<f32>) {
            // dL/dw = sum_i grad_i * x_i
            let dw: f32 = inputs
                .data()
                .iter()
                .zip(grad_output.iter())
                .map(|(x, g)| x * g)
                .sum();
            self.params[0].accumulate_grad(&Array1::from_vec(vec![dw]));
        }

        fn params(&self) -> &[Tensor] {
            &self.params
        }

        fn params_mut(&mut self) -> &mut [Tensor] {
            &mut self.params
        }
    }

    fn batch(inputs: Vec<f32>, targets: Vec<f32>) -> Batch {
        Batch::new(
            Tensor::from_vec(inputs, false),
            Tensor::from_vec(targets, false),
        )
    }

    fn trainer(w: f32, lr: f32) -> Trainer<Scale> {
        Trainer::new(
            Scale::new(w),
            Box::new(SGD::new(lr, 0.0)),
            Box::new(MSELoss),
            Device::Cpu,
            TrainConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_train_epoch_moves_weight_toward_target() {
        // Learn y = 2x starting from w = 0.
        let mut t = trainer(0.0, 0.1);
        let before = t.model().w();
        let loss = t
            .train_one_epoch(vec![batch(vec![1.0, 2.0], vec![2.0, 4.0])])
            .unwrap();
        assert!(loss > 0.0);
        assert!(t.model().w() > before);
        assert_eq!(t.metrics.steps, 1);
    }

    #[test]
    fn test_validate_epoch_does_not_touch_weights() {
        let mut t = trainer(1.0, 0.1);
        let loss = t
            .validate_one_epoch(vec![batch(vec![1.0], vec![3.0])])
            .unwrap();
        assert_eq!(loss, 4.0);
        assert_eq!(t.model().w(), 1.0);
        assert_eq!(t.metrics.steps, 0);
    }

    #[test]
    fn test_empty_train_loader_is_an_error() {
        let mut t = trainer(1.0, 0.1);
        let result = t.train_one_epoch(Vec::new());
        assert!(matches!(result, Err(TrainError::EmptyAccumulator)));
    }

    #[test]
    fn test_nan_loss_diverges_before_weight_update() {
        let mut t = trainer(1.0, 0.1);
        let result = t.train_one_epoch(vec![batch(vec![1.0], vec![f32::NAN])]);
        match result {
            Err(TrainError::Diverged { epoch, phase, .. }) => {
                assert_eq!(epoch, 0);
                assert_eq!(phase, Phase::Train);
            }
            other => panic!("expected Diverged, got {other:?}"),
        }
        // The diverging batch must not have stepped the optimizer.
        assert_eq!(t.model().w(), 1.0);
        assert_eq!(t.metrics.steps, 0);
    }

    #[test]
    fn test_validation_divergence_reports_phase() {
        let mut t = trainer(1.0, 0.1);
        let result = t.validate_one_epoch(vec![batch(vec![1.0], vec![f32::INFINITY])]);
        assert!(matches!(
            result,
            Err(TrainError::Diverged {
                phase: Phase::Validation,
                ..
            })
        ));
    }

    #[test]
    fn test_grad_clipping_limits_update() {
        let config = TrainConfig::new().with_grad_clip(0.01);
        let mut clipped = Trainer::new(
            Scale::new(0.0),
            Box::new(SGD::new(0.1, 0.0)),
            Box::new(MSELoss),
            Device::Cpu,
            config,
        )
        .unwrap();
        let mut unclipped = trainer(0.0, 0.1);

        let batches = || vec![batch(vec![10.0], vec![100.0])];
        clipped.train_one_epoch(batches()).unwrap();
        unclipped.train_one_epoch(batches()).unwrap();

        assert!(clipped.model().w().abs() < unclipped.model().w().abs());
    }

    #[test]
    fn test_mean_is_weighted_by_batch_size() {
        let mut t = trainer(0.0, 0.0);
        // w = 0 and lr = 0: predictions are all zero, weights never move.
        // Batch losses are 1.0 (4 samples) and 4.0 (1 sample).
        let loss = t
            .train_one_epoch(vec![
                batch(vec![0.0; 4], vec![1.0; 4]),
                batch(vec![0.0], vec![2.0]),
            ])
            .unwrap();
        assert!((loss - 8.0 / 5.0).abs() < 1e-6);
    }
}
