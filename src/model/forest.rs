//! Random forest regressor

use super::tree::{DecisionTreeRegressor, TreeParams};
use super::{check_shapes, ModelError, Regressor};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,

    #[serde(flatten)]
    pub tree: TreeParams,

    /// Draw a bootstrap sample of the training rows for each tree
    pub bootstrap: bool,

    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            tree: TreeParams::default(),
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestParams {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_estimators == 0 {
            return Err(ModelError::InvalidParameter(
                "n_estimators must be > 0".to_string(),
            ));
        }
        self.tree.validate()
    }
}

/// Bagged ensemble of regression trees; predicts the mean of its trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    params: ForestParams,
    trees: Vec<DecisionTreeRegressor>,
    n_features: usize,
}

impl RandomForestRegressor {
    /// Fit `params.n_estimators` trees.
    ///
    /// Per-tree seeds are drawn up front from `params.seed`, so the fitted
    /// forest does not depend on how tree fitting is scheduled across threads.
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>, params: &ForestParams) -> Result<Self, ModelError> {
        check_shapes(x, y)?;
        params.validate()?;

        let mut rng = StdRng::seed_from_u64(params.seed);
        let seeds: Vec<u64> = (0..params.n_estimators).map(|_| rng.random()).collect();
        let n = x.nrows();

        let trees = seeds
            .into_par_iter()
            .map(|seed| {
                let samples = if params.bootstrap {
                    let mut rng = StdRng::seed_from_u64(seed);
                    (0..n).map(|_| rng.random_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                DecisionTreeRegressor::fit_samples(x, y, samples, &params.tree)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            n_estimators = trees.len(),
            rows = n,
            max_depth = trees.iter().map(|t| t.depth()).max().unwrap_or(0),
            "Fitted random forest"
        );

        Ok(Self {
            params: *params,
            trees,
            n_features: x.ncols(),
        })
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn trees(&self) -> &[DecisionTreeRegressor] {
        &self.trees
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    /// Check a deserialized forest before serving from it
    pub fn validate_structure(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::InvalidParameter("forest has no trees".to_string()));
        }
        for tree in &self.trees {
            if tree.n_features() != self.n_features {
                return Err(ModelError::InvalidParameter(format!(
                    "tree fit on {} features inside a forest of {}",
                    tree.n_features(),
                    self.n_features
                )));
            }
            tree.validate_structure()?;
        }
        Ok(())
    }
}

impl Regressor for RandomForestRegressor {
    fn predict_row(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        sum / self.trees.len() as f64
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
