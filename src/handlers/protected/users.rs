use axum::Extension;

use crate::auth::AuthenticatedUser;
use crate::database::UserProfile;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/users - the authenticated caller's own profile
pub async fn current(Extension(user): Extension<AuthenticatedUser>) -> ApiResult<UserProfile> {
    Ok(ApiResponse::success(user.0))
}
