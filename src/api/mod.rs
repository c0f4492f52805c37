// src/api/mod.rs — HTTP API server

pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::provider::roles::ModelRoles;
use crate::provider::ModelProvider;

/// Shared state for API handlers. The provider connection is the only
/// resource shared across requests; each request builds its own session.
#[derive(Clone)]
pub struct ApiState {
    pub provider: Arc<dyn ModelProvider>,
    pub roles: ModelRoles,
    pub default_max_iteration: u8,
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:5173".parse().unwrap(),
            "http://localhost:3000".parse().unwrap(),
        ])
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/generate-tweet", post(handlers::generate_tweet))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Start the API server on the given port (blocking).
pub async fn start_server(port: u16, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("127.0.0.1:{port}");

    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
