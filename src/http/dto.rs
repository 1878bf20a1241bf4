/// Wire DTOs for the REST surface.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Language, RoleName, Status, User};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Creation payload. Required fields are optional here so that shape
/// validation can answer with the coded error list instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub language: Option<Language>,
    pub roles: Vec<RoleName>,
}

/// Partial edit; absent fields stay untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchUsersFilter {
    pub email: Option<String>,
    pub status: Option<Status>,
    pub role: Option<RoleName>,
    pub size: Option<usize>,
    pub offset: Option<usize>,
}

/// Public view of a user record; credential material never appears here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub language: Language,
    pub roles: Vec<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            status: user.status,
            created_at: user.created_at,
            language: user.language,
            roles: user.roles_as_strings(),
        }
    }
}
