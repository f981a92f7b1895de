//! Regression metrics for held-out evaluation
//!
//! - MSE, MAE, RMSE
//! - R², reported by the pipeline as a percentage

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Trait for evaluation metrics
pub trait Metric {
    /// Compute the metric given predictions and targets
    fn compute(&self, predictions: &Array1<f64>, targets: &Array1<f64>) -> f64;

    /// Name of the metric
    fn name(&self) -> &str;

    /// Whether higher values are better (true) or lower (false)
    fn higher_is_better(&self) -> bool {
        true
    }
}

/// Coefficient of determination
///
/// Unbounded below: a model worse than predicting the mean scores negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct R2Score;

impl Metric for R2Score {
    fn compute(&self, predictions: &Array1<f64>, targets: &Array1<f64>) -> f64 {
        assert_eq!(predictions.len(), targets.len());

        if predictions.is_empty() {
            return 0.0;
        }

        let y_mean = targets.mean().unwrap_or(0.0);

        let ss_res: f64 = predictions
            .iter()
            .zip(targets.iter())
            .map(|(&p, &t)| (t - p).powi(2))
            .sum();

        let ss_tot: f64 = targets.iter().map(|&t| (t - y_mean).powi(2)).sum();

        if ss_tot == 0.0 {
            return if ss_res == 0.0 { 1.0 } else { 0.0 };
        }

        1.0 - (ss_res / ss_tot)
    }

    fn name(&self) -> &str {
        "R²"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MSE;

impl Metric for MSE {
    fn compute(&self, predictions: &Array1<f64>, targets: &Array1<f64>) -> f64 {
        assert_eq!(predictions.len(), targets.len());

        if predictions.is_empty() {
            return 0.0;
        }

        predictions
            .iter()
            .zip(targets.iter())
            .map(|(&p, &t)| (p - t).powi(2))
            .sum::<f64>()
            / predictions.len() as f64
    }

    fn name(&self) -> &str {
        "MSE"
    }

    fn higher_is_better(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MAE;

impl Metric for MAE {
    fn compute(&self, predictions: &Array1<f64>, targets: &Array1<f64>) -> f64 {
        assert_eq!(predictions.len(), targets.len());

        if predictions.is_empty() {
            return 0.0;
        }

        predictions
            .iter()
            .zip(targets.iter())
            .map(|(&p, &t)| (p - t).abs())
            .sum::<f64>()
            / predictions.len() as f64
    }

    fn name(&self) -> &str {
        "MAE"
    }

    fn higher_is_better(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RMSE;

impl Metric for RMSE {
    fn compute(&self, predictions: &Array1<f64>, targets: &Array1<f64>) -> f64 {
        MSE.compute(predictions, targets).sqrt()
    }

    fn name(&self) -> &str {
        "RMSE"
    }

    fn higher_is_better(&self) -> bool {
        false
    }
}

/// Held-out evaluation summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub mse: f64,
    pub mae: f64,

    /// R² × 100, not clamped
    pub r2_percent: f64,

    pub n_samples: usize,
}

impl Evaluation {
    pub fn compute(predictions: &Array1<f64>, targets: &Array1<f64>) -> Self {
        Self {
            mse: MSE.compute(predictions, targets),
            mae: MAE.compute(predictions, targets),
            r2_percent: R2Score.compute(predictions, targets) * 100.0,
            n_samples: targets.len(),
        }
    }
}
