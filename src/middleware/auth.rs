use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::AuthGate;
use crate::error::ApiError;

/// Basic authentication middleware: runs the gate and attaches the
/// `AuthenticatedUser` to the request extensions for downstream handlers.
pub async fn basic_auth_middleware(
    State(gate): State<Arc<AuthGate>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not valid UTF-8 is treated as absent
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let user = gate.authenticate(authorization.as_deref()).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
