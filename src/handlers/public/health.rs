use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Welcome to the course catalog API"
    }))
}

/// GET /health - liveness plus a readable course document
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let courses = state.courses.list_all().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("Course store unavailable")
    })?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "courses": courses.len()
    })))
}
