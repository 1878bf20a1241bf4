use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Structured error entry returned inside 400 bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDTO {
    pub code: i32,
    pub description: String,
}

impl ErrorDTO {
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// Business-rule or input-shape failure; carries the ordered error list
    /// the caller sees.
    #[error("validation failed")]
    Validation(Vec<ErrorDTO>),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        match self {
            IdentityError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            // A token whose subject no longer resolves cuts the request
            // short with an empty body.
            IdentityError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            IdentityError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid token"})),
            )
                .into_response(),
            IdentityError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Authentication required"})),
            )
                .into_response(),
            IdentityError::UserNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "User not found"})),
            )
                .into_response(),
            IdentityError::EmailAlreadyExists => (
                StatusCode::CONFLICT,
                Json(json!({"error": "Email already registered"})),
            )
                .into_response(),
            IdentityError::Internal(msg) => {
                tracing::error!("{msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
