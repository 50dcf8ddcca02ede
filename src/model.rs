//! Model capability consumed by the trainer
//!
//! The trainer only needs a forward pass, a collaborator-owned backward pass,
//! and access to the parameter list. Gradient computation lives entirely on
//! the model side; the trainer never differentiates anything.

use ndarray::Array1;

use crate::Tensor;

/// An opaque trainable model.
pub trait Model {
    /// Compute predictions for a batch of inputs.
    fn forward(&self, inputs: &Tensor) -> Tensor;

    /// Backpropagate: given `dL/d(predictions)` for the batch, accumulate
    /// gradients into the model parameters.
    fn backward(&mut self, inputs: &Tensor, grad_output: &Array1<f32>);

    /// Model parameters, in a stable order.
    fn params(&self) -> &[Tensor];

    /// Mutable view of the parameters, for the optimizer.
    fn params_mut(&mut self) -> &mut [Tensor];

    /// Snapshot the current parameter values.
    fn state(&self) -> ModelState {
        ModelState::capture(self.params())
    }

    /// Restore parameter values from a snapshot taken on this model.
    fn load_state(&mut self, state: &ModelState) {
        for (param, values) in self.params_mut().iter().zip(state.tensors()) {
            param.data_mut().assign(values);
        }
    }
}

/// A point-in-time copy of a model's parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    tensors: Vec<Array1<f32>>,
}

impl ModelState {
    /// Capture the values of a parameter list.
    pub fn capture(params: &[Tensor]) -> Self {
        Self {
            tensors: params.iter().map(|p| p.data().clone()).collect(),
        }
    }

    /// The captured parameter arrays.
    pub fn tensors(&self) -> &[Array1<f32>] {
        &self.tensors
    }

    /// Number of captured parameter tensors.
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }
}
