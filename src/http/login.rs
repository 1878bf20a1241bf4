/// Login resource.
use axum::{extract::State, http::HeaderMap, Json};
use tracing::info;

use crate::error::Result;
use crate::http::dto::LoginResponse;
use crate::validators;
use crate::AppState;

/// POST /v1/login with Basic credentials. Success mints a signed session
/// token; failures return the ordered error list from the validator.
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<LoginResponse>> {
    let user = validators::login::validate_login(state.users.as_ref(), &headers).await?;

    info!(user_id = user.id, "User logged in");

    let token = state.tokens.issue(&user)?;

    Ok(Json(LoginResponse { token }))
}
