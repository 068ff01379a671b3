use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{activation::ActivationFunction, matrix::Matrix};

/// One fully-connected layer: `a = activation(x * W + b)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// `input_size x size`.
    pub weights: Matrix,
    pub biases: Vec<f32>,
    pub activation: ActivationFunction,
}

impl DenseLayer {
    pub fn new(weights: Matrix, biases: Vec<f32>, activation: ActivationFunction) -> DenseLayer {
        DenseLayer { weights, biases, activation }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if self.biases.len() != self.size() {
            return Err(Error::ModelFormat(format!(
                "layer has {} neurons but {} biases",
                self.size(),
                self.biases.len()
            )));
        }
        if self.biases.iter().any(|b| !b.is_finite()) {
            return Err(Error::ModelFormat("layer contains non-finite biases".into()));
        }
        Ok(())
    }

    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut z = self.weights.left_mul(input);
        for (v, b) in z.iter_mut().zip(&self.biases) {
            *v += b;
        }
        self.activation.apply(&mut z);
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_applies_bias_then_activation() {
        let layer = DenseLayer::new(
            Matrix::from_data(vec![vec![1.0, -1.0], vec![0.5, 0.5]]),
            vec![0.0, -2.0],
            ActivationFunction::ReLU,
        );
        // z = [1*2 + 0.5*2, -1*2 + 0.5*2] + [0, -2] = [3, -3]
        assert_eq!(layer.forward(&[2.0, 2.0]), vec![3.0, 0.0]);
    }

    #[test]
    fn bias_count_must_match() {
        let layer = DenseLayer::new(Matrix::zeros(2, 3), vec![0.0; 2], ActivationFunction::Identity);
        assert!(matches!(layer.validate(), Err(Error::ModelFormat(_))));
    }
}
