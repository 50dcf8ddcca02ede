//! Gradient clipping

use crate::Tensor;

/// Clip gradients so their global L2 norm is at most `max_norm`.
///
/// Returns the pre-clip norm.
pub fn clip_grad_norm(params: &mut [Tensor], max_norm: f32) -> f32 {
    let mut total = 0.0f64;
    for param in params.iter() {
        if let Some(grad) = param.grad() {
            total += f64::from(grad.mapv(|g| g * g).sum());
        }
    }
    let norm = total.sqrt() as f32;

    if norm > max_norm && norm > 0.0 {
        let scale = max_norm / norm;
        for param in params.iter() {
            if let Some(grad) = param.grad() {
                param.set_grad(grad * scale);
            }
        }
    }

    norm
}
