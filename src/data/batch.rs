//! Batch data structure

use crate::Tensor;

/// One unit of input/target data yielded by a loader.
#[derive(Clone)]
pub struct Batch {
    /// Input features
    pub inputs: Tensor,
    /// Target labels/values
    pub targets: Tensor,
}

impl Batch {
    /// Create a new batch
    pub fn new(inputs: Tensor, targets: Tensor) -> Self {
        Self { inputs, targets }
    }

    /// Build a batch directly from raw feature and target values, the shape
    /// loaders usually hold them in. Neither tensor joins the gradient path.
    ///
    /// Panics if the slices differ in length.
    pub fn from_slices(inputs: &[f32], targets: &[f32]) -> Self {
        assert_eq!(
            inputs.len(),
            targets.len(),
            "inputs and targets must have same length"
        );
        Self::new(
            Tensor::from_vec(inputs.to_vec(), false),
            Tensor::from_vec(targets.to_vec(), false),
        )
    }

    /// Number of samples in the batch (length of inputs)
    pub fn size(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_creation() {
        let inputs = Tensor::from_vec(vec![1.0, 2.0, 3.0], false);
        let targets = Tensor::from_vec(vec![4.0, 5.0, 6.0], false);

        let batch = Batch::new(inputs, targets);

        assert_eq!(batch.size(), 3);
    }

    #[test]
    fn test_from_slices() {
        let batch = Batch::from_slices(&[1.0, 2.0], &[3.0, 4.0]);
        assert_eq!(batch.size(), 2);
        assert_eq!(batch.inputs.to_vec(), vec![1.0, 2.0]);
        assert_eq!(batch.targets.to_vec(), vec![3.0, 4.0]);
        assert!(!batch.inputs.requires_grad());
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_from_slices_length_mismatch_panics() {
        Batch::from_slices(&[1.0], &[1.0, 2.0]);
    }
}
