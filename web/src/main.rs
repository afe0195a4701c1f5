//! TEN web server
//!
//! HTTP front-end for the TEN search engine. Endpoints:
//! - POST /move   - AI move for a raw board snapshot
//! - POST /game   - Full client-move flow (validate, answer, reply)
//! - GET  /health - Health check
//!
//! The engine itself is synchronous and compute-bound; handlers push each
//! search onto the blocking pool so the runtime keeps serving while the
//! worker pool thinks.

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

mod central_config;
mod handlers;
mod types;

use handlers::{ai_move, health, play};

/// Shared application state.
pub struct AppState {
    /// Wall-clock budget handed to the engine per decision.
    pub think_time: Duration,
}

/// Create the application router with the given state.
/// This is separated out for testing purposes.
pub fn create_app(state: Arc<AppState>) -> Router {
    // The browser client is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .route("/move", post(ai_move))
        .route("/game", post(play))
        .layer(cors)
        .with_state(state)
}

/// Creates a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received, stopping server...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ten_web=info")),
        )
        .init();

    let think_time = central_config::get_think_time();
    let state = Arc::new(AppState { think_time });
    info!(think_time_ms = think_time.as_millis() as u64, "Engine configured");

    let app = create_app(state);

    let addr = format!(
        "{}:{}",
        central_config::get_host(),
        central_config::get_port()
    );
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

// ============================================================================
// Integration Tests
// ============================================================================
