use crate::constants::{TENSOR_MAX, TENSOR_MIN};
use crate::error::{Error, Result};

/// Batched NHWC image tensor, stored flat in row-major order.
///
/// Pixel `(n, y, x)` channel `c` lives at
/// `((n * height + y) * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl ImageTensor {
    /// Wraps `data` as a tensor of `shape`; the element count must match.
    pub fn new(shape: [usize; 4], data: Vec<f32>) -> Result<ImageTensor> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![data.len()],
            });
        }
        Ok(ImageTensor { shape, data })
    }

    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn batch_size(&self) -> usize {
        self.shape[0]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Flat `H * W * C` slice for one batch element.
    pub fn batch_item(&self, index: usize) -> Option<&[f32]> {
        let per_item = self.shape[1] * self.shape[2] * self.shape[3];
        let start = index.checked_mul(per_item)?;
        self.data.get(start..start + per_item)
    }

    /// Fails with `NormalizationError` on the first value that is not finite
    /// or lies outside `[-1, 1]`.
    pub fn check_range(&self) -> Result<()> {
        match self
            .data
            .iter()
            .position(|v| !v.is_finite() || *v < TENSOR_MIN || *v > TENSOR_MAX)
        {
            Some(i) => Err(Error::NormalizationError(format!(
                "value {} at flat index {} is outside [{}, {}]",
                self.data[i], i, TENSOR_MIN, TENSOR_MAX
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_element_count() {
        let err = ImageTensor::new([1, 2, 2, 3], vec![0.0; 11]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn batch_item_slices_each_element() {
        let data: Vec<f32> = (0..24).map(|v| v as f32 / 24.0).collect();
        let tensor = ImageTensor::new([2, 2, 2, 3], data).unwrap();
        assert_eq!(tensor.batch_item(1).unwrap()[0], 12.0 / 24.0);
        assert!(tensor.batch_item(2).is_none());
    }

    #[test]
    fn range_check_catches_nan_and_overflow() {
        let ok = ImageTensor::new([1, 1, 1, 3], vec![-1.0, 0.0, 1.0]).unwrap();
        assert!(ok.check_range().is_ok());

        let nan = ImageTensor::new([1, 1, 1, 3], vec![0.0, f32::NAN, 0.0]).unwrap();
        assert!(matches!(nan.check_range(), Err(Error::NormalizationError(_))));

        let big = ImageTensor::new([1, 1, 1, 3], vec![0.0, 0.0, 1.5]).unwrap();
        assert!(matches!(big.check_range(), Err(Error::NormalizationError(_))));
    }
}
