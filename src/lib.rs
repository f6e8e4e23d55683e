pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod types;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

pub use state::AppState;

/// Full route table. Transport layers (CORS, tracing, body limits) are added by `main`.
///
/// Reads are public; writes and the current-user route sit behind
/// `basic_auth_middleware`, applied per method so both tiers can share a path.
pub fn app(state: AppState) -> Router {
    use handlers::{protected, public};

    let auth = from_fn_with_state(state.gate.clone(), middleware::basic_auth_middleware);

    Router::new()
        .route("/", get(public::health::root))
        .route("/health", get(public::health::health))
        .route(
            "/api/users",
            post(public::users::register).merge(get(protected::users::current).route_layer(auth.clone())),
        )
        .route(
            "/api/courses",
            get(public::courses::list).merge(post(protected::courses::create).route_layer(auth.clone())),
        )
        .route("/api/courses/random", get(public::courses::random))
        .route(
            "/api/courses/:id",
            get(public::courses::show).merge(
                put(protected::courses::update)
                    .delete(protected::courses::delete)
                    .route_layer(auth),
            ),
        )
        .with_state(state)
}
