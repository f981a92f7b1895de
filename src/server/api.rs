//! API router and server setup
//!
//! Configures axum routes and runs the HTTP server.

use crate::server::{
    handlers::{accuracy, health_check, predict},
    state::AppState,
    Result, ServerConfig, ServerError,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Demand prediction server
pub struct DemandServer {
    config: ServerConfig,
    state: AppState,
}

impl DemandServer {
    /// Create a server, loading artifacts from `config.artifacts_dir`
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::load(&config.artifacts_dir);
        Self { config, state }
    }

    /// Create a server around an already built state
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .route("/predict", post(predict))
            .route("/accuracy", get(accuracy))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.cors_enabled {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the server until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let addr = self.config.address;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{addr}: {e}")))?;

        info!(%addr, ready = self.state.is_ready(), "Demand server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Io)?;

        info!("Demand server stopped");
        Ok(())
    }

    /// Get the configured address
    pub fn address(&self) -> SocketAddr {
        self.config.address
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed
        std::future::pending::<()>().await;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Record};
    use crate::inference::Predictor;
    use crate::model::ForestParams;
    use crate::server::{AccuracyResponse, ErrorResponse, HealthResponse, PredictResponse};
    use crate::train::{run_training, PipelineConfig};
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use serde::de::DeserializeOwned;
    use std::sync::OnceLock;
    use tower::ServiceExt;

    fn trained_predictor() -> Predictor {
        static BUNDLE: OnceLock<crate::io::ArtifactBundle> = OnceLock::new();
        let bundle = BUNDLE.get_or_init(|| {
            let records = (0..80)
                .map(|i| Record {
                    store_id: (i % 3) as i64 + 1,
                    sku_id: (i % 4) as i64 + 1,
                    total_price: 80.0 + (i % 7) as f64 * 5.0,
                    base_price: 90.0 + (i % 5) as f64 * 5.0,
                    is_featured_sku: (i % 2) as f64,
                    is_display_sku: ((i / 3) % 2) as f64,
                    units_sold: (i % 40) as f64,
                })
                .collect();
            let config = PipelineConfig {
                forest: ForestParams {
                    n_estimators: 5,
                    ..ForestParams::default()
                },
                ..PipelineConfig::default()
            };
            run_training(&Dataset::new(records), &config).unwrap().bundle
        });
        Predictor::from_bundle(bundle.clone())
    }

    fn ready_server() -> DemandServer {
        DemandServer::with_state(
            ServerConfig::default(),
            AppState::ready(trained_predictor()),
        )
    }

    fn not_ready_server() -> DemandServer {
        DemandServer::with_state(ServerConfig::default(), AppState::not_ready("no artifacts"))
    }

    fn post_predict(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const VALID: &str = r#"{"store_id": 1, "sku_id": 2, "total_price": 100, "base_price": 50, "is_featured_sku": 1, "is_display_sku": 0}"#;

    #[tokio::test]
    async fn test_server_address() {
        assert_eq!(ready_server().address().port(), 5000);
    }

    #[tokio::test]
    async fn test_predict_success() {
        let response = ready_server().router().oneshot(post_predict(VALID)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: PredictResponse = json_body(response).await;
        assert!(body.predicted_units >= 0.0);
        assert!(body.is_demand_high == "Yes" || body.is_demand_high == "No");
        assert_eq!(
            body.is_demand_high == "Yes",
            body.predicted_demand_percentage > 50.0
        );
    }

    #[tokio::test]
    async fn test_predict_is_deterministic() {
        let server = ready_server();
        let first: PredictResponse =
            json_body(server.router().oneshot(post_predict(VALID)).await.unwrap()).await;
        let second: PredictResponse =
            json_body(server.router().oneshot(post_predict(VALID)).await.unwrap()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_predict_unknown_store() {
        let body = VALID.replace(r#""store_id": 1"#, r#""store_id": 999"#);
        let response = ready_server().router().oneshot(post_predict(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = json_body(response).await;
        assert_eq!(error.error, "Invalid Store ID.");
    }

    #[tokio::test]
    async fn test_predict_invalid_flag() {
        let body = VALID.replace(r#""is_display_sku": 0"#, r#""is_display_sku": 2"#);
        let response = ready_server().router().oneshot(post_predict(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = json_body(response).await;
        assert_eq!(error.error, "'Display SKU' must be 0 or 1.");
    }

    #[tokio::test]
    async fn test_predict_missing_field() {
        let body = r#"{"store_id": 1, "sku_id": 2}"#;
        let response = ready_server().router().oneshot(post_predict(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = json_body(response).await;
        assert_eq!(error.error, "Invalid or missing value for: total_price");
    }

    #[tokio::test]
    async fn test_predict_malformed_json() {
        let response = ready_server()
            .router()
            .oneshot(post_predict("{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_unexpected_failure_is_generic_500() {
        // base_price = -1 makes price_per_unit infinite
        let body = VALID.replace(r#""base_price": 50"#, r#""base_price": -1"#);
        let response = ready_server().router().oneshot(post_predict(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let error: ErrorResponse = json_body(response).await;
        assert_eq!(error.error, "Prediction failed. Check your input values.");
    }

    #[tokio::test]
    async fn test_predict_not_ready() {
        let response = not_ready_server()
            .router()
            .oneshot(post_predict(VALID))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let error: ErrorResponse = json_body(response).await;
        assert_eq!(error.error, "Server not ready. Missing model components.");
    }

    #[tokio::test]
    async fn test_predict_not_ready_even_for_invalid_input() {
        let response = not_ready_server()
            .router()
            .oneshot(post_predict("{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_accuracy_endpoint() {
        let server = ready_server();
        let expected = server
            .state()
            .predictor
            .as_ref()
            .map(|p| (p.r2_score() * 100.0).round() / 100.0)
            .unwrap();

        let response = server.router().oneshot(get("/accuracy")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: AccuracyResponse = json_body(response).await;
        assert_eq!(body.r2_score, expected);
    }

    #[tokio::test]
    async fn test_accuracy_not_available() {
        let response = not_ready_server()
            .router()
            .oneshot(get("/accuracy"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let error: ErrorResponse = json_body(response).await;
        assert_eq!(error.error, "Model accuracy not available.");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = ready_server().router().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: HealthResponse = json_body(response).await;
        assert!(body.ready);
        assert_eq!(body.status, "ok");

        let response = not_ready_server()
            .router()
            .oneshot(get("/health"))
            .await
            .unwrap();
        let body: HealthResponse = json_body(response).await;
        assert!(!body.ready);
        assert_eq!(body.status, "not_ready");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = ready_server().router().oneshot(get("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_disabled_router_still_serves() {
        let config = ServerConfig {
            cors_enabled: false,
            ..ServerConfig::default()
        };
        let server = DemandServer::with_state(config, AppState::ready(trained_predictor()));
        let response = server.router().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
