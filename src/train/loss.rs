//! Loss functions for training
//!
//! A loss function is a pure value/gradient pair: `forward` produces the
//! scalar batch loss, `backward` produces `dL/d(predictions)` for the model
//! to backpropagate. The trainer itself never differentiates.

use ndarray::Array1;

use crate::Tensor;

/// Trait for loss functions
pub trait LossFn {
    /// Scalar loss given predictions and targets.
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> f32;

    /// Gradient of the loss with respect to the predictions.
    fn backward(&self, predictions: &Tensor, targets: &Tensor) -> Array1<f32>;

    /// Name of the loss function
    fn name(&self) -> &'static str;
}

/// Mean Squared Error Loss
///
/// L = mean((predictions - targets)²)
pub struct MSELoss;

impl LossFn for MSELoss {
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );
        let diff = &*predictions.data() - &*targets.data();
        let squared = &diff * &diff;
        squared.mean().unwrap_or(0.0)
    }

    fn backward(&self, predictions: &Tensor, targets: &Tensor) -> Array1<f32> {
        // d(MSE)/d(pred) = 2 * (pred - target) / n
        let n = predictions.len() as f32;
        let diff = &*predictions.data() - &*targets.data();
        diff * (2.0 / n)
    }

    fn name(&self) -> &'static str {
        "MSE"
    }
}

/// Mean Absolute Error Loss
///
/// L = mean(|predictions - targets|)
pub struct L1Loss;

impl LossFn for L1Loss {
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );
        let diff = &*predictions.data() - &*targets.data();
        diff.mapv(f32::abs).mean().unwrap_or(0.0)
    }

    fn backward(&self, predictions: &Tensor, targets: &Tensor) -> Array1<f32> {
        // d(L1)/d(pred) = sign(pred - target) / n
        let n = predictions.len() as f32;
        let diff = &*predictions.data() - &*targets.data();
        diff.mapv(|d| d.signum() / n)
    }

    fn name(&self) -> &'static str {
        "L1"
    }
}
