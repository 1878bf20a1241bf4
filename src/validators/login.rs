/// Ordered credential verification for the login endpoint.
///
/// Five stages run in a fixed order and stop at the first failure; error
/// codes 1-5 are part of the wire contract. Stages three and five share the
/// same generic message so the response never reveals whether the shape or
/// the password was wrong.
use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::db::users::UserDirectory;
use crate::error::{ErrorDTO, IdentityError, Result};
use crate::models::User;
use crate::security::password::{is_acceptable_password, salted_hash};

// RFC 5321 puts the ceiling at 254 characters. A source of heated debate,
// so bear that in mind should this blow in the future.
pub const EMAIL_MAX_LENGTH: usize = 254;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Walk the verification stages in order. A clean pass returns the matched
/// user for token issuance.
pub async fn validate_login(users: &dyn UserDirectory, headers: &HeaderMap) -> Result<User> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) => value,
        None => {
            return Err(validation(
                1,
                "Invalid parameters, authentication header is null",
            ))
        }
    };

    let (email, password) = extract_basic_credentials(header)?;

    if !is_email_valid(&email) || !is_acceptable_password(&password, false) {
        return Err(validation(3, "Invalid login credentials"));
    }

    let user = match users.find_by_email(&email).await? {
        Some(user) => user,
        None => {
            warn!(email = %email, "This user does not exist");
            return Err(validation(4, "This user does not exist"));
        }
    };

    let Some(salt) = user.salt.as_deref() else {
        warn!(email = %email, "User does not have a salt assigned. Password has not been correctly set.");
        return Err(validation(5, "User login failed. Contact administrator."));
    };

    let computed = salted_hash(salt, &password);
    if user.password_hash.as_deref() != Some(computed.as_str()) {
        warn!(email = %email, "Wrong password");
        return Err(validation(3, "Invalid login credentials"));
    }

    Ok(user)
}

fn validation(code: i32, description: &str) -> IdentityError {
    IdentityError::Validation(vec![ErrorDTO::new(code, description)])
}

/// Split the Basic payload into email and password. A payload that cannot
/// be decoded, or that carries no password segment, fails stage two.
fn extract_basic_credentials(header: &HeaderValue) -> Result<(String, String)> {
    let missing_password = || validation(2, "Missing parameter: password");

    let raw = header.to_str().map_err(|_| missing_password())?;
    let payload = raw.strip_prefix("Basic ").unwrap_or(raw).trim();
    let decoded = BASE64.decode(payload).map_err(|_| missing_password())?;
    let decoded = String::from_utf8(decoded).map_err(|_| missing_password())?;

    match decoded.split_once(':') {
        Some((email, password)) => Ok((email.to_string(), password.to_string())),
        None => Err(missing_password()),
    }
}

fn is_email_valid(email: &str) -> bool {
    !email.trim().is_empty() && email.len() <= EMAIL_MAX_LENGTH && EMAIL_REGEX.is_match(email)
}
