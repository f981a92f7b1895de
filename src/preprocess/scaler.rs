//! Z-score feature scaling
//!
//! Statistics are learned once from the training split and frozen; the same
//! mean and scale are applied to the test split and to every inference row.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalerError {
    #[error("Cannot fit a scaler on zero samples")]
    Empty,

    #[error("Feature width mismatch: scaler was fit on {expected} features, got {got}")]
    WidthMismatch { expected: usize, got: usize },
}

/// Per-feature standardisation `(x - mean) / scale`
///
/// Uses the population standard deviation. Constant columns keep a scale of
/// 1.0 so they map to zero instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
    n_samples_seen: usize,
}

impl StandardScaler {
    /// Learn per-column mean and standard deviation
    pub fn fit(x: &Array2<f64>) -> Result<Self, ScalerError> {
        if x.nrows() == 0 {
            return Err(ScalerError::Empty);
        }

        let mean = x.mean_axis(Axis(0)).ok_or(ScalerError::Empty)?;
        let std = x.std_axis(Axis(0), 0.0);
        let scale = std.mapv(|s| if s > 0.0 && s.is_finite() { s } else { 1.0 });

        Ok(Self {
            mean: mean.to_vec(),
            scale: scale.to_vec(),
            n_samples_seen: x.nrows(),
        })
    }

    /// Fit on `x` and return the transformed matrix
    pub fn fit_transform(x: &Array2<f64>) -> Result<(Self, Array2<f64>), ScalerError> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }

    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, ScalerError> {
        self.check_width(x.ncols())?;
        let mean = ArrayView1::from(&self.mean);
        let scale = ArrayView1::from(&self.scale);
        Ok((x - &mean) / &scale)
    }

    pub fn transform_row(&self, row: &[f64]) -> Result<Array1<f64>, ScalerError> {
        self.check_width(row.len())?;
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn n_samples_seen(&self) -> usize {
        self.n_samples_seen
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    fn check_width(&self, got: usize) -> Result<(), ScalerError> {
        if got != self.n_features() {
            return Err(ScalerError::WidthMismatch {
                expected: self.n_features(),
                got,
            });
        }
        Ok(())
    }
}
