/// User resource handlers.
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use crate::db::users::{CreateUser, UserFilter};
use crate::error::{IdentityError, Result};
use crate::http::context::RequestContext;
use crate::http::dto::{
    CreateUserRequest, EditUserRequest, PasswordChangeRequest, SearchUsersFilter, UserResponse,
};
use crate::models::{Language, RoleName};
use crate::security::password::{generate_salt, salted_hash};
use crate::validators;
use crate::AppState;

/// Reads are restricted to the privileged roles.
fn require_reader(context: &RequestContext) -> Result<()> {
    if context.caller.is_none() {
        return Err(IdentityError::Unauthorized);
    }

    if context.caller_has_role(RoleName::God) || context.caller_has_role(RoleName::Scholar) {
        Ok(())
    } else {
        Err(IdentityError::Forbidden)
    }
}

/// GET /v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>> {
    require_reader(&context)?;

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(IdentityError::UserNotFound)?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /v1/users with optional email/status/role filters.
pub async fn search_users(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Query(filter): Query<SearchUsersFilter>,
) -> Result<Json<Vec<UserResponse>>> {
    require_reader(&context)?;

    let filter = UserFilter {
        email: filter.email,
        status: filter.status,
        role: filter.role,
        size: filter.size.unwrap_or(30),
        offset: filter.offset.unwrap_or(0),
    };

    let users = state.users.search(&filter).await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /v1/users. Open endpoint; new accounts start PENDING.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>> {
    validators::users::validate_creation(&request)?;

    let salt = generate_salt();
    let password_hash = salted_hash(&salt, request.password.as_deref().unwrap_or_default());

    let user = state
        .users
        .create(CreateUser {
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            language: request.language.unwrap_or(Language::DEFAULT),
            roles: request.roles,
            salt,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User created");

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /v1/users/{id}. Partial edit under the self-or-GOD guard.
pub async fn edit_user(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Path(id): Path<i64>,
    Json(request): Json<EditUserRequest>,
) -> Result<Json<UserResponse>> {
    validators::users::validate_edition(state.users.as_ref(), &context, id, &request).await?;

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(IdentityError::UserNotFound)?;

    if let Some(name) = request.name {
        user.name = name;
    }
    if let Some(email) = request.email {
        user.email = email;
    }
    if let Some(language) = request.language {
        user.language = language;
    }

    let user = state.users.update(user).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /v1/users/{id}/roles. Replaces the role list wholesale; GOD can
/// never enter through here.
pub async fn edit_user_roles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(roles): Json<Vec<RoleName>>,
) -> Result<Json<UserResponse>> {
    validators::users::validate_role_edition(&roles)?;

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(IdentityError::UserNotFound)?;

    user.roles = roles;
    let user = state.users.update(user).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /v1/users/{id}/password. Re-salts on every change.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Path(id): Path<i64>,
    Json(request): Json<PasswordChangeRequest>,
) -> Result<StatusCode> {
    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(IdentityError::UserNotFound)?;

    validators::users::validate_password_change(&context, &user, &request)?;

    let salt = generate_salt();
    user.password_hash = Some(salted_hash(&salt, &request.new_password));
    user.salt = Some(salt);
    state.users.update(user).await?;

    Ok(StatusCode::NO_CONTENT)
}
