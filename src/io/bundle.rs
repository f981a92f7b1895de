//! The five artifacts produced by training

use crate::data::ValidIds;
use crate::features::N_FEATURES;
use crate::model::{RandomForestRegressor, Regressor};
use crate::preprocess::StandardScaler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact '{name}' not found in {}", .dir.display())]
    Missing { name: &'static str, dir: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize {name}: {message}")]
    Serialize { name: &'static str, message: String },

    #[error("Inconsistent artifacts: {0}")]
    Inconsistent(String),
}

/// One persisted artifact file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Scaler,
    MaxDemand,
    ValidIds,
    R2Score,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Model,
        ArtifactKind::Scaler,
        ArtifactKind::MaxDemand,
        ArtifactKind::ValidIds,
        ArtifactKind::R2Score,
    ];

    /// File name without extension
    pub fn stem(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::MaxDemand => "max_demand",
            ArtifactKind::ValidIds => "valid_ids",
            ArtifactKind::R2Score => "r2_score",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Everything inference needs to reproduce training-time behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactBundle {
    pub estimator: RandomForestRegressor,
    pub scaler: StandardScaler,

    /// Largest `units_sold` in the training data
    pub max_demand: f64,

    pub valid_ids: ValidIds,

    /// Held-out R² as a percentage
    pub r2_score: f64,
}

/// Human-oriented overview of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSummary {
    pub n_estimators: usize,
    pub n_features: usize,
    pub max_tree_depth: usize,
    pub total_leaves: usize,
    pub scaler_samples: usize,
    pub max_demand: f64,
    pub n_store_ids: usize,
    pub n_sku_ids: usize,
    pub r2_score: f64,
}

impl ArtifactBundle {
    pub fn summary(&self) -> BundleSummary {
        let trees = self.estimator.trees();
        BundleSummary {
            n_estimators: trees.len(),
            n_features: self.estimator.n_features(),
            max_tree_depth: trees.iter().map(|t| t.depth()).max().unwrap_or(0),
            total_leaves: trees.iter().map(|t| t.n_leaves()).sum(),
            scaler_samples: self.scaler.n_samples_seen(),
            max_demand: self.max_demand,
            n_store_ids: self.valid_ids.store_ids.len(),
            n_sku_ids: self.valid_ids.sku_ids.len(),
            r2_score: self.r2_score,
        }
    }

    /// Check that the artifacts agree with each other and with the feature
    /// schema. Run after every load; a bundle that fails is never served.
    pub fn check_consistency(&self) -> Result<(), ArtifactError> {
        self.estimator
            .validate_structure()
            .map_err(|e| ArtifactError::Inconsistent(format!("model: {e}")))?;

        if self.estimator.n_features() != N_FEATURES {
            return Err(ArtifactError::Inconsistent(format!(
                "model expects {} features, schema has {N_FEATURES}",
                self.estimator.n_features()
            )));
        }

        if self.scaler.n_features() != N_FEATURES || self.scaler.scale().len() != N_FEATURES {
            return Err(ArtifactError::Inconsistent(format!(
                "scaler was fit on {} features, schema has {N_FEATURES}",
                self.scaler.n_features()
            )));
        }
        if self.scaler.scale().iter().any(|s| !s.is_finite() || *s == 0.0)
            || self.scaler.mean().iter().any(|m| !m.is_finite())
        {
            return Err(ArtifactError::Inconsistent(
                "scaler statistics must be finite with non-zero scale".to_string(),
            ));
        }

        if !self.max_demand.is_finite() {
            return Err(ArtifactError::Inconsistent(
                "max_demand must be finite".to_string(),
            ));
        }

        if self.valid_ids.is_empty() {
            return Err(ArtifactError::Inconsistent(
                "valid_ids has no store or no SKU identifiers".to_string(),
            ));
        }

        Ok(())
    }
}
