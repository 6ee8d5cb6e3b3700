//! In-memory regression dataset

use super::{Batch, TrainError};
use crate::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed-size table of samples with `features` inputs and one target each
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: usize,
    inputs: Vec<f32>,
    targets: Vec<f32>,
}

impl Dataset {
    /// Build a dataset from flattened row-major inputs and one target per row
    pub fn from_rows(
        features: usize,
        inputs: Vec<f32>,
        targets: Vec<f32>,
    ) -> Result<Self, TrainError> {
        if features == 0 {
            return Err(TrainError::Shape("dataset must have at least one feature".to_string()));
        }
        if inputs.len() != targets.len() * features {
            return Err(TrainError::Shape(format!(
                "expected {} input values for {} samples with {} features, got {}",
                targets.len() * features,
                targets.len(),
                features,
                inputs.len()
            )));
        }
        Ok(Self { features, inputs, targets })
    }

    /// Noisy samples of a random linear function, reproducible from `seed`
    pub fn synthetic_linear(samples: usize, features: usize, seed: u64) -> Self {
        let features = features.max(1);
        let mut rng = StdRng::seed_from_u64(seed);

        let weights: Vec<f32> = (0..features).map(|_| rng.random_range(-1.0..1.0)).collect();
        let bias: f32 = rng.random_range(-0.5..0.5);

        let mut inputs = Vec::with_capacity(samples * features);
        let mut targets = Vec::with_capacity(samples);
        for _ in 0..samples {
            let row: Vec<f32> = (0..features).map(|_| rng.random_range(-1.0..1.0)).collect();
            let y = row.iter().zip(&weights).map(|(x, w)| x * w).sum::<f32>()
                + bias
                + rng.random_range(-0.01..0.01);
            inputs.extend_from_slice(&row);
            targets.push(y);
        }

        Self { features, inputs, targets }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Inputs per sample
    pub fn features(&self) -> usize {
        self.features
    }

    /// Inputs and target of sample `index`
    pub fn sample(&self, index: usize) -> Option<(&[f32], f32)> {
        let target = *self.targets.get(index)?;
        let start = index * self.features;
        Some((&self.inputs[start..start + self.features], target))
    }

    /// Collect the given sample indices into one batch
    ///
    /// Out-of-range indices are skipped.
    pub fn gather(&self, indices: &[usize]) -> Batch {
        let mut inputs = Vec::with_capacity(indices.len() * self.features);
        let mut targets = Vec::with_capacity(indices.len());
        for (row, target) in indices.iter().filter_map(|&i| self.sample(i)) {
            inputs.extend_from_slice(row);
            targets.push(target);
        }
        Batch::new(Tensor::from_vec(inputs, false), Tensor::from_vec(targets, false))
    }
}
