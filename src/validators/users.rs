/// Validation and authorization rules for user mutation.
///
/// Unlike the login machine these checks accumulate every failure of their
/// single pass, so a caller fixing a rejected request sees all of it at
/// once.
use crate::db::users::UserDirectory;
use crate::error::{ErrorDTO, IdentityError, Result};
use crate::http::context::RequestContext;
use crate::http::dto::{CreateUserRequest, EditUserRequest, PasswordChangeRequest};
use crate::models::{RoleName, User};
use crate::security::password::{is_acceptable_password, salted_hash};

/// Shape checks for a creation payload: required fields present and
/// non-blank.
pub fn validate_creation_shape(request: &CreateUserRequest) -> Result<()> {
    let mut errors = Vec::new();

    if request
        .email
        .as_deref()
        .map_or(true, |email| email.trim().is_empty())
    {
        errors.push(ErrorDTO::new(1001, "Email cannot be null or empty"));
    }

    if request
        .password
        .as_deref()
        .map_or(true, |password| password.trim().is_empty())
    {
        errors.push(ErrorDTO::new(1002, "Password cannot be null or empty"));
    }

    if request.roles.is_empty() {
        errors.push(ErrorDTO::new(1003, "Roles cannot be null or empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(IdentityError::Validation(errors))
    }
}

/// Business rules for creation: password policy and the GOD prohibition.
pub fn validate_creation(request: &CreateUserRequest) -> Result<()> {
    validate_creation_shape(request)?;

    let mut errors = Vec::new();

    let password = request.password.as_deref().unwrap_or_default();
    if !is_acceptable_password(password, false) {
        errors.push(ErrorDTO::new(
            1,
            "Password does not comply to acceptable standards",
        ));
    }

    if request.roles.contains(&RoleName::God) {
        errors.push(ErrorDTO::new(2, "There is only one GOD"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(IdentityError::Validation(errors))
    }
}

/// Edition rules: field shape, the self-or-GOD guard, and email
/// uniqueness.
pub async fn validate_edition(
    users: &dyn UserDirectory,
    context: &RequestContext,
    target_id: i64,
    request: &EditUserRequest,
) -> Result<()> {
    let caller = context.caller.as_ref().ok_or(IdentityError::Unauthorized)?;

    let mut errors = Vec::new();

    if request
        .name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        errors.push(ErrorDTO::new(1, "Empty user names are not acceptable"));
    }

    if request
        .email
        .as_deref()
        .is_some_and(|email| email.trim().is_empty())
    {
        errors.push(ErrorDTO::new(2, "Empty emails are not acceptable"));
    }

    if caller.user_id != target_id && !caller.groups.contains(&RoleName::God) {
        errors.push(ErrorDTO::new(3, "User can only change its own data"));
    }

    // The target keeping its own email is not a collision.
    if let Some(email) = request.email.as_deref().filter(|e| !e.trim().is_empty()) {
        if let Some(existing) = users.find_by_email(email).await? {
            if existing.id != target_id {
                errors.push(ErrorDTO::new(4, "Email already in use"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(IdentityError::Validation(errors))
    }
}

/// Role replacement rules: a non-empty list that never names GOD.
pub fn validate_role_edition(roles: &[RoleName]) -> Result<()> {
    if roles.is_empty() {
        return Err(IdentityError::Validation(vec![ErrorDTO::new(
            1001,
            "Roles cannot be empty",
        )]));
    }

    if roles.contains(&RoleName::God) {
        return Err(IdentityError::Validation(vec![ErrorDTO::new(
            1,
            "There can only be one GOD",
        )]));
    }

    Ok(())
}

/// Password change rules: self-or-GOD, proof of the old credential, policy
/// on the new one.
pub fn validate_password_change(
    context: &RequestContext,
    target: &User,
    request: &PasswordChangeRequest,
) -> Result<()> {
    let caller = context.caller.as_ref().ok_or(IdentityError::Unauthorized)?;

    let mut errors = Vec::new();

    if caller.user_id != target.id && !caller.groups.contains(&RoleName::God) {
        errors.push(ErrorDTO::new(1, "User can only change its own data"));
    }

    let old_matches = target.salt.as_deref().is_some_and(|salt| {
        let computed = salted_hash(salt, &request.old_password);
        target.password_hash.as_deref() == Some(computed.as_str())
    });
    if !old_matches {
        errors.push(ErrorDTO::new(2, "Old password does not match"));
    }

    if !is_acceptable_password(&request.new_password, false) {
        errors.push(ErrorDTO::new(
            3,
            "Password does not comply to acceptable standards",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(IdentityError::Validation(errors))
    }
}
