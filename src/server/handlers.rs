//! Request handlers

use crate::inference::{round2, PredictError};
use crate::server::{
    state::AppState, AccuracyResponse, HealthResponse, PredictResponse, Result, ServerError,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::{debug, error};

/// POST /predict
///
/// Readiness is checked before the body is even parsed.
pub async fn predict(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>> {
    let predictor = state.predictor.as_ref().ok_or(ServerError::NotReady)?;

    let Json(payload) = payload.map_err(|rejection| {
        ServerError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;

    match predictor.predict_json(&payload) {
        Ok(result) => {
            debug!(
                predicted_units = result.predicted_units,
                percentage = result.predicted_demand_percentage,
                "Prediction served"
            );
            Ok(Json(result.into()))
        }
        Err(PredictError::Request(e)) => Err(ServerError::BadRequest(e.to_string())),
        Err(PredictError::Inference(e)) => {
            error!(error = %e, "Prediction failed");
            Err(ServerError::PredictionFailed)
        }
    }
}

/// GET /accuracy
pub async fn accuracy(State(state): State<AppState>) -> Result<Json<AccuracyResponse>> {
    let predictor = state
        .predictor
        .as_ref()
        .ok_or(ServerError::AccuracyUnavailable)?;
    Ok(Json(AccuracyResponse {
        r2_score: round2(predictor.r2_score()),
    }))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ready = state.is_ready();
    Json(HealthResponse {
        status: if ready { "ok" } else { "not_ready" }.to_string(),
        ready,
        uptime_secs: state.uptime_secs(),
    })
}
