use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;

use crate::auth::AuthenticatedUser;
use crate::database::Course;
use crate::handlers::{parse_course_id, validation};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/courses - 201 with the created course and its Location
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Course> {
    let body = validation::json_body(body)?;
    let payload = validation::course_payload(&body)?;

    let course = state.courses.create(payload).await?;
    tracing::info!(course_id = course.id, "Course created by {}", user.identity());

    let location = format!("/api/courses/{}", course.id);
    Ok(ApiResponse::created(course, location))
}

/// PUT /api/courses/:id - 204, or 404 when the course does not exist
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<()> {
    let body = validation::json_body(body)?;
    let payload = validation::course_payload(&body)?;
    let id = parse_course_id(&id)?;

    state.courses.update(id, payload).await?;
    tracing::info!(course_id = id, "Course updated by {}", user.identity());

    Ok(ApiResponse::no_content())
}

/// DELETE /api/courses/:id - 204, or 404 when the course does not exist
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_course_id(&id)?;

    state.courses.delete(id).await?;
    tracing::info!(course_id = id, "Course deleted by {}", user.identity());

    Ok(ApiResponse::no_content())
}
