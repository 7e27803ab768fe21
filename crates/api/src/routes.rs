use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::error::RelayError;
use crate::metrics::MetricsSnapshot;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

// The body is taken raw so a missing or non-JSON body gets our own 400
// instead of axum's extractor rejection.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, RelayError> {
    let analysis = state.relay.analyze(&body).await?;

    Ok(Json(AnalysisResponse {
        success: true,
        analysis,
    }))
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "connections-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "api_key_configured": state.relay.has_api_key(),
    }))
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        let state = AppState::new(&AppConfig::default()).unwrap();
        create_router(state)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_analyze(body: &str) -> Request<Body> {
        Request::post("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_missing_key() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, json) = send(router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["api_key_configured"], false);
    }

    #[tokio::test]
    async fn empty_body_is_missing_words() {
        let (status, json) = send(router(), post_analyze("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({ "error": "No words provided" }));
    }

    #[tokio::test]
    async fn short_board_is_rejected() {
        let (status, json) = send(router(), post_analyze(r#"{"words": ["A", "B"]}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Exactly 16 words are required");
    }

    #[tokio::test]
    async fn valid_board_without_key_is_503() {
        let words: Vec<String> = (0..16).map(|i| format!("W{i}")).collect();
        let body = serde_json::json!({ "words": words }).to_string();
        let (status, json) = send(router(), post_analyze(&body)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "No API key configured on the server");
    }
}
