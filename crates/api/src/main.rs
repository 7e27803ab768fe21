use std::net::SocketAddr;

use anyhow::{Context, Result};
use api::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "Loaded configuration"
    );
    if config.upstream.api_key.is_none() {
        tracing::warn!("No API key configured; /analyze will answer 503 until ANTHROPIC_API_KEY is set");
    }

    let state = api::AppState::new(&config)?;
    let app = api::app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// `RUST_LOG` picks the level (default `info`); `LOG_FORMAT=json` switches format.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
