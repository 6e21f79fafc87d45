//! Abacus API /v1: REST endpoints over the step engine
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;

pub use config::ApiConfig;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, read-only request state
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ApiConfig,
}

pub fn create_app(config: ApiConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/v1/steps", post(handlers::steps))
        .route("/v1/verify", post(handlers::verify_trace))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_text))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let addr = config.addr.clone();
    let app = create_app(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Abacus API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
