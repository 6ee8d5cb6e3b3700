//! Gradient clipping utilities

use crate::Tensor;

/// Clip gradients by global norm
///
/// Computes the global norm of all gradients and scales them down if the norm
/// exceeds max_norm. Relative magnitudes across parameters are preserved.
///
/// Algorithm:
/// 1. global_norm = sqrt(sum of all gradient squared norms)
/// 2. If global_norm > max_norm, every gradient is multiplied by max_norm / global_norm
///
/// # Returns
/// The global norm before clipping
pub fn clip_grad_norm(params: &mut [Tensor], max_norm: f32) -> f32 {
    let total_norm_sq: f32 = params
        .iter()
        .filter_map(Tensor::grad)
        .map(|grad| grad.iter().map(|&g| g * g).sum::<f32>())
        .sum();

    let global_norm = total_norm_sq.sqrt();

    if global_norm > max_norm {
        let clip_coef = max_norm / global_norm;
        for param in params.iter_mut() {
            if let Some(grad) = param.grad() {
                let clipped = grad * clip_coef;
                param.set_grad(clipped);
            }
        }
    }

    global_norm
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    fn with_grad(grad: &[f32]) -> Tensor {
        let mut t = Tensor::zeros(grad.len(), true);
        t.set_grad(arr1(grad));
        t
    }

    #[test]
    fn test_clip_grad_norm_no_clipping() {
        let mut params = vec![with_grad(&[0.3, 0.4])];
        let norm = clip_grad_norm(&mut params, 1.0);

        assert_relative_eq!(norm, 0.5, epsilon = 1e-6);
        assert_eq!(params[0].grad().unwrap(), &arr1(&[0.3, 0.4]));
    }

    #[test]
    fn test_clip_grad_norm_with_clipping() {
        let mut params = vec![with_grad(&[3.0, 4.0])];
        let norm = clip_grad_norm(&mut params, 1.0);

        assert_relative_eq!(norm, 5.0, epsilon = 1e-6);
        let grad = params[0].grad().unwrap();
        assert_relative_eq!(grad[0], 0.6, epsilon = 1e-6);
        assert_relative_eq!(grad[1], 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_clip_grad_norm_across_params() {
        let mut params = vec![with_grad(&[3.0]), with_grad(&[4.0])];
        clip_grad_norm(&mut params, 2.5);

        assert_relative_eq!(params[0].grad().unwrap()[0], 1.5, epsilon = 1e-6);
        assert_relative_eq!(params[1].grad().unwrap()[0], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_clip_grad_norm_no_gradients() {
        let mut params = vec![Tensor::zeros(3, true)];
        assert_eq!(clip_grad_norm(&mut params, 1.0), 0.0);
        assert!(params[0].grad().is_none());
    }
}
