//! Linear regression model with mean-squared-error loss

use super::{Batch, TrainError};
use crate::Tensor;
use ndarray::Array1;

/// `y = x . w + b`
///
/// Parameters live in the trainer as two tensors: weights (`features`) and
/// bias (`1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearModel {
    features: usize,
}

impl LinearModel {
    pub fn new(features: usize) -> Self {
        Self { features }
    }

    pub fn features(&self) -> usize {
        self.features
    }

    /// Zero-initialized weights and bias
    pub fn init_params(&self) -> Vec<Tensor> {
        vec![Tensor::zeros(self.features, true), Tensor::zeros(1, true)]
    }

    /// Predictions for every sample in the batch
    pub fn forward(&self, params: &[Tensor], batch: &Batch) -> Result<Array1<f32>, TrainError> {
        let [weights, bias] = params else {
            return Err(TrainError::Shape(format!(
                "expected 2 parameter tensors, got {}",
                params.len()
            )));
        };
        let x = batch
            .inputs
            .data()
            .view()
            .into_shape_with_order((batch.size(), self.features))
            .map_err(|e| TrainError::Shape(e.to_string()))?;
        Ok(x.dot(weights.data()) + bias.data()[0])
    }

    /// MSE loss; accumulates its gradient into the parameter tensors
    pub fn loss_and_backward(
        &self,
        params: &mut [Tensor],
        batch: &Batch,
    ) -> Result<f32, TrainError> {
        let n = batch.size();
        if n == 0 {
            return Ok(0.0);
        }
        let residual = self.forward(params, batch)? - batch.targets.data();
        let loss = residual.mapv(|r| r * r).sum() / n as f32;

        let x = batch
            .inputs
            .data()
            .view()
            .into_shape_with_order((n, self.features))
            .map_err(|e| TrainError::Shape(e.to_string()))?;
        let scale = 2.0 / n as f32;
        let grad_w = x.t().dot(&residual) * scale;
        let grad_b = Array1::from_elem(1, residual.sum() * scale);

        params[0].accumulate_grad(&grad_w);
        params[1].accumulate_grad(&grad_b);
        Ok(loss)
    }
}
