use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::auth::hash_password;
use crate::database::{NewUser, UserDirectory, UserProfile};
use crate::handlers::validation;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/users - register a user with a bcrypt-hashed password
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<UserProfile> {
    let body = validation::json_body(body)?;
    let input = validation::registration(&body)?;

    let password_hash = hash_password(&input.password, state.bcrypt_cost).await?;
    let user = state
        .users
        .create(NewUser {
            first_name: input.first_name,
            last_name: input.last_name,
            email_address: input.email_address,
            password_hash,
        })
        .await?;

    Ok(ApiResponse::created(UserProfile::from(&user), "/"))
}
