//! Regression estimators
//!
//! - `DecisionTreeRegressor`: CART tree with the squared-error criterion
//! - `RandomForestRegressor`: bootstrap-aggregated trees, mean prediction

mod forest;
mod tree;


pub use forest::{ForestParams, RandomForestRegressor};
pub use tree::{DecisionTreeRegressor, Node, TreeParams};

use ndarray::{Array1, Array2};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("Row count mismatch: {rows} feature rows, {targets} targets")]
    ShapeMismatch { rows: usize, targets: usize },

    #[error("Invalid hyperparameter: {0}")]
    InvalidParameter(String),
}

/// A fitted regression model
pub trait Regressor {
    /// Predict a single row
    fn predict_row(&self, row: &[f64]) -> f64;

    /// Number of input features the model was fit on
    fn n_features(&self) -> usize;

    /// Predict every row of `x`
    fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        x.rows()
            .into_iter()
            .map(|row| match row.as_slice() {
                Some(slice) => self.predict_row(slice),
                None => self.predict_row(&row.to_vec()),
            })
            .collect()
    }
}

fn check_shapes(x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
    if x.nrows() != y.len() {
        return Err(ModelError::ShapeMismatch {
            rows: x.nrows(),
            targets: y.len(),
        });
    }
    if x.nrows() == 0 {
        return Err(ModelError::EmptyTrainingSet);
    }
    Ok(())
}
