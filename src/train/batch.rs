//! Batch data structure

use crate::Tensor;

/// A training batch containing inputs and targets
///
/// `inputs` holds `size() * features()` values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Input features, flattened row-major
    pub inputs: Tensor,
    /// Target values, one per sample
    pub targets: Tensor,
}

impl Batch {
    /// Create a new batch
    pub fn new(inputs: Tensor, targets: Tensor) -> Self {
        Self { inputs, targets }
    }

    /// Number of samples in the batch
    pub fn size(&self) -> usize {
        self.targets.len()
    }

    /// Number of features per sample
    pub fn features(&self) -> usize {
        if self.targets.is_empty() {
            0
        } else {
            self.inputs.len() / self.targets.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_creation() {
        let inputs = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], false);
        let targets = Tensor::from_vec(vec![4.0, 5.0, 6.0], false);

        let batch = Batch::new(inputs, targets);

        assert_eq!(batch.size(), 3);
        assert_eq!(batch.features(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let batch = Batch::new(Tensor::zeros(0, false), Tensor::zeros(0, false));
        assert_eq!(batch.size(), 0);
        assert_eq!(batch.features(), 0);
    }
}
