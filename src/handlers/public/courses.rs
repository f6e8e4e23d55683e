use axum::extract::{Path, State};

use crate::database::Course;
use crate::handlers::parse_course_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/courses - every course in stored order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Course>> {
    Ok(ApiResponse::success(state.courses.list_all().await?))
}

/// GET /api/courses/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Course> {
    let id = parse_course_id(&id)?;
    Ok(ApiResponse::success(state.courses.get_by_id(id).await?))
}

/// GET /api/courses/random - one course chosen uniformly, 404 EMPTY_STORE when none exist
pub async fn random(State(state): State<AppState>) -> ApiResult<Course> {
    Ok(ApiResponse::success(state.courses.get_random().await?))
}
