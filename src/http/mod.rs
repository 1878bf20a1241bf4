/// REST surface of the identity service.
pub mod context;
pub mod dto;
mod login;
mod users;

pub use context::{
    request_context_pipeline, AuthenticatedCaller, ClientApplicationData, RequestContext,
};

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the router with the ordered request-context pipeline wrapped
/// around every resource route. Health probes sit outside the pipeline.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/login", post(login::login))
        .route(
            "/v1/users",
            get(users::search_users).post(users::create_user),
        )
        .route("/v1/users/{id}", get(users::get_user).put(users::edit_user))
        .route("/v1/users/{id}/roles", put(users::edit_user_roles))
        .route("/v1/users/{id}/password", put(users::change_password))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            context::request_context_pipeline,
        ))
        .route("/health", get(health_check))
        .route("/readiness", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn health_check() -> &'static str {
    "OK"
}

/// Startup cannot complete without signing keys, so a serving process is
/// always ready.
async fn readiness_check() -> &'static str {
    "identity"
}
