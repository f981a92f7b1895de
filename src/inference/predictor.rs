//! Request → prediction

use crate::data::ValidIds;
use crate::features::{validate_request, FeatureVector, RequestError, ValidatedRequest, FEATURE_NAMES};
use crate::io::ArtifactBundle;
use crate::model::{RandomForestRegressor, Regressor};
use crate::preprocess::{ScalerError, StandardScaler};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Demand percentages strictly above this are classified as high demand
pub const HIGH_DEMAND_PERCENT: f64 = 50.0;

/// Unexpected failures after a request passed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("Feature '{feature}' is not finite")]
    NonFiniteFeature { feature: &'static str },

    #[error("Scaler rejected feature vector: {0}")]
    Scaler(#[from] ScalerError),

    #[error("Model expects {expected} features, scaler produced {got}")]
    ModelWidth { expected: usize, got: usize },

    #[error("Model produced a non-finite prediction: {0}")]
    NonFinitePrediction(f64),

    #[error("max_demand must be positive and finite, got {0}")]
    InvalidMaxDemand(f64),
}

/// Either side of a failed prediction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Model output for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted units, rounded to two decimals
    pub predicted_units: f64,

    /// `predicted_units / max_demand * 100`, rounded to two decimals
    pub predicted_demand_percentage: f64,

    pub is_demand_high: bool,
}

/// Round to two decimals using the exact decimal value of `value`, with
/// ties going to the even digit: `0.125` becomes `0.12`, `0.375` becomes
/// `0.38`, and `2.675` (stored just below the tie) becomes `2.67`.
///
/// Fixed-precision float formatting rounds exactly this way, so the value is
/// taken from it instead of from `(value * 100.0).round()`, whose scaling
/// step can itself round.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Frozen artifacts plus the inference-time transform.
///
/// Generic over the model so request handling can be exercised without a
/// fitted forest.
#[derive(Debug, Clone)]
pub struct Predictor<M: Regressor = RandomForestRegressor> {
    model: M,
    scaler: StandardScaler,
    max_demand: f64,
    valid_ids: ValidIds,
    r2_score: f64,
}

impl Predictor<RandomForestRegressor> {
    pub fn from_bundle(bundle: ArtifactBundle) -> Self {
        Self::from_parts(
            bundle.estimator,
            bundle.scaler,
            bundle.max_demand,
            bundle.valid_ids,
            bundle.r2_score,
        )
    }
}

impl<M: Regressor> Predictor<M> {
    pub fn from_parts(
        model: M,
        scaler: StandardScaler,
        max_demand: f64,
        valid_ids: ValidIds,
        r2_score: f64,
    ) -> Self {
        Self {
            model,
            scaler,
            max_demand,
            valid_ids,
            r2_score,
        }
    }

    /// Validate a raw JSON payload, then predict
    pub fn predict_json(&self, payload: &Value) -> Result<PredictionResult, PredictError> {
        let request = validate_request(payload, &self.valid_ids)?;
        Ok(self.predict(&request)?)
    }

    /// Predict for an already validated request
    pub fn predict(&self, request: &ValidatedRequest) -> Result<PredictionResult, InferenceError> {
        if !(self.max_demand.is_finite() && self.max_demand > 0.0) {
            return Err(InferenceError::InvalidMaxDemand(self.max_demand));
        }

        let features = FeatureVector::for_inference(request);
        if let Some(idx) = features.first_non_finite() {
            return Err(InferenceError::NonFiniteFeature {
                feature: FEATURE_NAMES[idx],
            });
        }

        let scaled = self.scaler.transform_row(features.as_slice())?;
        if scaled.len() != self.model.n_features() {
            return Err(InferenceError::ModelWidth {
                expected: self.model.n_features(),
                got: scaled.len(),
            });
        }

        let units = self.model.predict_row(&scaled.to_vec());
        if !units.is_finite() {
            return Err(InferenceError::NonFinitePrediction(units));
        }

        let percentage = round2(units / self.max_demand * 100.0);
        Ok(PredictionResult {
            predicted_units: round2(units),
            predicted_demand_percentage: percentage,
            is_demand_high: percentage > HIGH_DEMAND_PERCENT,
        })
    }

    /// Held-out R² percentage recorded at training time
    pub fn r2_score(&self) -> f64 {
        self.r2_score
    }

    pub fn max_demand(&self) -> f64 {
        self.max_demand
    }

    pub fn valid_ids(&self) -> &ValidIds {
        &self.valid_ids
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}
