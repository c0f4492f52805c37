// src/api/handlers.rs

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::{types::*, ApiState};
use crate::core::engine::RefineEngine;
use crate::core::types::TweetResult;
use crate::infra::errors::TweetforgeError;

/// POST /api/generate-tweet — Run the refinement loop for a topic.
pub async fn generate_tweet(
    State(state): State<ApiState>,
    Json(body): Json<TweetRequest>,
) -> Result<Json<TweetResult>, (StatusCode, Json<ErrorResponse>)> {
    let max_iteration = body.max_iteration.unwrap_or(state.default_max_iteration);

    // Session state lives entirely inside this call; nothing is shared
    // across requests except the provider handle.
    let engine = RefineEngine::new(state.provider.clone(), state.roles.clone());
    match engine.run(&body.topic, max_iteration).await {
        Ok(result) => Ok(Json(result)),
        Err(e @ TweetforgeError::Validation(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
        Err(e) => {
            tracing::error!("tweet generation failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// GET /api/health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "Tweet Generator API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET / — Welcome payload pointing at the API routes.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to Tweet Generator API",
        "generate": "/api/generate-tweet",
        "health": "/api/health",
    }))
}
