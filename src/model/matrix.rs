use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dense row-major weight matrix as stored in model files.
///
/// A layer's weights have `rows = input_size` and `cols = size`, so a forward
/// pass is the row vector `input (1 x rows)` times this matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f32>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![vec![0.0; cols]; rows] }
    }

    pub fn from_data(data: Vec<Vec<f32>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |r| r.len()),
            data,
        }
    }

    /// Checks that the declared dimensions match the stored rows.
    pub fn validate(&self) -> Result<()> {
        if self.data.len() != self.rows {
            return Err(Error::ModelFormat(format!(
                "matrix declares {} rows but stores {}",
                self.rows,
                self.data.len()
            )));
        }
        if let Some((i, row)) = self.data.iter().enumerate().find(|(_, r)| r.len() != self.cols) {
            return Err(Error::ModelFormat(format!(
                "matrix row {} has {} columns, expected {}",
                i,
                row.len(),
                self.cols
            )));
        }
        if self.data.iter().flatten().any(|w| !w.is_finite()) {
            return Err(Error::ModelFormat("matrix contains non-finite weights".into()));
        }
        Ok(())
    }

    /// Row vector times matrix: `out[j] = sum_k input[k] * self[k][j]`.
    ///
    /// `input.len()` must equal `rows`.
    pub fn left_mul(&self, input: &[f32]) -> Vec<f32> {
        debug_assert_eq!(input.len(), self.rows);
        let mut out = vec![0.0f32; self.cols];
        for (x, row) in input.iter().zip(&self.data) {
            if *x == 0.0 {
                continue;
            }
            for (acc, w) in out.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        out
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}
