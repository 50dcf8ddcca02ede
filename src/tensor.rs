//! Parameter tensor with shared storage and gradient slot
//!
//! A thin wrapper over `ndarray::Array1<f32>`. Clones share storage, so an
//! optimizer can update parameters it received by value and the owning model
//! observes the change. There is no computational graph here: gradient values
//! are produced by the `Model`/`LossFn` collaborators and deposited via
//! `accumulate_grad`.

use ndarray::Array1;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// A 1-D parameter or data tensor.
#[derive(Clone)]
pub struct Tensor {
    data: Rc<RefCell<Array1<f32>>>,
    grad: Rc<RefCell<Option<Array1<f32>>>>,
    requires_grad: bool,
}

impl Tensor {
    /// Create a tensor from a vector of values.
    pub fn from_vec(values: Vec<f32>, requires_grad: bool) -> Self {
        Self {
            data: Rc::new(RefCell::new(Array1::from_vec(values))),
            grad: Rc::new(RefCell::new(None)),
            requires_grad,
        }
    }

    /// Create a zero-filled tensor of length `n`.
    pub fn zeros(n: usize, requires_grad: bool) -> Self {
        Self::from_vec(vec![0.0; n], requires_grad)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the tensor has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the underlying values.
    pub fn data(&self) -> Ref<'_, Array1<f32>> {
        self.data.borrow()
    }

    /// Mutably borrow the underlying values.
    pub fn data_mut(&self) -> RefMut<'_, Array1<f32>> {
        self.data.borrow_mut()
    }

    /// Copy the values out.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.borrow().to_vec()
    }

    /// Current gradient, if one has been accumulated.
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.grad.borrow().clone()
    }

    /// Replace the gradient.
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.grad.borrow_mut() = Some(grad);
    }

    /// Add `grad` into the gradient slot, initialising it if empty.
    pub fn accumulate_grad(&self, grad: &Array1<f32>) {
        let mut slot = self.grad.borrow_mut();
        match slot.as_mut() {
            Some(existing) => *existing += grad,
            None => *slot = Some(grad.clone()),
        }
    }

    /// Clear the gradient.
    pub fn zero_grad(&self) {
        *self.grad.borrow_mut() = None;
    }

    /// Whether this tensor participates in the gradient path.
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("data", &*self.data.borrow())
            .field("requires_grad", &self.requires_grad)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_from_vec_and_len() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
        assert_eq!(t.len(), 3);
        assert!(!t.is_empty());
        assert!(t.requires_grad());
        assert_eq!(t.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_zeros() {
        let t = Tensor::zeros(4, false);
        assert_eq!(t.to_vec(), vec![0.0; 4]);
        assert!(!t.requires_grad());
    }

    #[test]
    fn test_clone_shares_storage() {
        let t = Tensor::from_vec(vec![1.0, 2.0], true);
        let alias = t.clone();
        alias.data_mut()[0] = 9.0;
        assert_eq!(t.data()[0], 9.0);
    }

    #[test]
    fn test_grad_accumulation() {
        let t = Tensor::zeros(2, true);
        assert!(t.grad().is_none());

        t.accumulate_grad(&arr1(&[1.0, 2.0]));
        t.accumulate_grad(&arr1(&[0.5, 0.5]));
        assert_eq!(t.grad().unwrap(), arr1(&[1.5, 2.5]));

        t.zero_grad();
        assert!(t.grad().is_none());
    }

    #[test]
    fn test_set_grad_replaces() {
        let t = Tensor::zeros(2, true);
        t.accumulate_grad(&arr1(&[1.0, 1.0]));
        t.set_grad(arr1(&[3.0, 4.0]));
        assert_eq!(t.grad().unwrap(), arr1(&[3.0, 4.0]));
    }
}
