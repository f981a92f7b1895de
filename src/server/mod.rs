//! HTTP inference service
//!
//! Loads the artifact bundle once at startup and serves:
//! - `POST /predict` - demand prediction for one request
//! - `GET /accuracy` - held-out R² recorded at training time
//! - `GET /health` - readiness and uptime
//!
//! If the bundle fails to load, the service still starts and answers every
//! prediction with 503 until it is restarted with valid artifacts.

mod api;
mod handlers;
mod state;

pub use api::DemandServer;
pub use state::AppState;

use crate::inference::PredictionResult;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub artifacts_dir: PathBuf,
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([127, 0, 0, 1], 5000)),
            artifacts_dir: PathBuf::from("./artifacts"),
            cors_enabled: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Server not ready. Missing model components.")]
    NotReady,

    #[error("Model accuracy not available.")]
    AccuracyUnavailable,

    /// Details are logged server-side, never returned
    #[error("Prediction failed. Check your input values.")]
    PredictionFailed,

    #[error("Failed to bind: {0}")]
    Bind(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotReady | ServerError::AccuracyUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::PredictionFailed | ServerError::Bind(_) | ServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_units: f64,
    pub predicted_demand_percentage: f64,

    /// `"Yes"` or `"No"`
    pub is_demand_high: String,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            predicted_units: result.predicted_units,
            predicted_demand_percentage: result.predicted_demand_percentage,
            is_demand_high: if result.is_demand_high { "Yes" } else { "No" }.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyResponse {
    pub r2_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub ready: bool,
    pub uptime_secs: u64,
}
