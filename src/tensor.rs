//! Minimal parameter tensor

use ndarray::Array1;

/// A 1-D parameter with an optional accumulated gradient
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Array1<f32>,
    grad: Option<Array1<f32>>,
    requires_grad: bool,
}

impl Tensor {
    /// Create a tensor from raw values
    pub fn from_vec(values: Vec<f32>, requires_grad: bool) -> Self {
        Self { data: Array1::from(values), grad: None, requires_grad }
    }

    /// Create a zero-filled tensor
    pub fn zeros(len: usize, requires_grad: bool) -> Self {
        Self { data: Array1::zeros(len), grad: None, requires_grad }
    }

    pub fn data(&self) -> &Array1<f32> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array1<f32> {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Current gradient, if one has been accumulated
    pub fn grad(&self) -> Option<&Array1<f32>> {
        self.grad.as_ref()
    }

    /// Replace the gradient
    pub fn set_grad(&mut self, grad: Array1<f32>) {
        self.grad = Some(grad);
    }

    /// Add to the gradient, initializing it on first use
    pub fn accumulate_grad(&mut self, grad: &Array1<f32>) {
        if !self.requires_grad {
            return;
        }
        match self.grad.as_mut() {
            Some(existing) => *existing += grad,
            None => self.grad = Some(grad.clone()),
        }
    }

    pub fn zero_grad(&mut self) {
        self.grad = None;
    }

    /// Size of the parameter data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_accumulate_grad() {
        let mut t = Tensor::zeros(3, true);
        t.accumulate_grad(&arr1(&[1.0, 2.0, 3.0]));
        t.accumulate_grad(&arr1(&[1.0, 1.0, 1.0]));
        assert_eq!(t.grad().unwrap(), &arr1(&[2.0, 3.0, 4.0]));

        t.zero_grad();
        assert!(t.grad().is_none());
    }

    #[test]
    fn test_no_grad_tensor_ignores_accumulation() {
        let mut t = Tensor::from_vec(vec![1.0, 2.0], false);
        t.accumulate_grad(&arr1(&[1.0, 1.0]));
        assert!(t.grad().is_none());
        assert_eq!(t.size_bytes(), 8);
    }
}
