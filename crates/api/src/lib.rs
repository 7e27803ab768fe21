//! HTTP relay that turns a Connections board into a model prompt and
//! returns the model's grouping text.

pub mod config;
pub mod error;
pub mod metrics;
pub mod relay;
pub mod routes;

pub use config::AppConfig;
pub use error::{ConfigurationError, RelayError, ValidationError};
pub use relay::Relay;

use std::any::Any;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderName, Method};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::metrics::{Metrics, Outcome};

pub struct AppState {
    pub relay: Relay,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Arc<Self>> {
        let client = llm::AnthropicClient::new(config.client_config())?;
        let metrics = Metrics::new();
        let relay = Relay::new(client, config.upstream.api_key.clone(), metrics.clone());

        Ok(Arc::new(Self { relay, metrics }))
    }
}

/// Full application router with CORS, access logging and panic handling.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ]);

    let metrics = state.metrics.clone();
    let on_panic = move |err: Box<dyn Any + Send + 'static>| handle_panic(&metrics, err);

    routes::create_router(state)
        .layer(CatchPanicLayer::custom(on_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// A panic never reaches `Relay::analyze`'s bookkeeping, so it is counted here.
fn handle_panic(metrics: &Metrics, err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    metrics.record_request(Outcome::Failure);
    RelayError::Internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn panic_becomes_generic_500() {
        let metrics = Metrics::new();
        let response = handle_panic(&metrics, Box::new("boom at relay.rs:42"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));
    }

    #[test]
    fn panic_counts_as_failure() {
        let metrics = Metrics::new();
        handle_panic(&metrics, Box::new(String::from("index out of bounds")));
        handle_panic(&metrics, Box::new(7_u8));

        let snap = metrics.snapshot();
        assert_eq!(snap.total_requests, 2);
        assert_eq!(snap.failed_requests, 2);
        assert_eq!(snap.successful_requests, 0);
    }
}
