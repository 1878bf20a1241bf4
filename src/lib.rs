/// Aeminium Identity Service Library
///
/// Authenticates credentials, issues signed session tokens and derives a
/// verified caller context for every request.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: User directory collaborator (lookups and provisioning)
/// - `error`: Error types and the coded error-list wire form
/// - `http`: REST surface, request-context pipeline
/// - `models`: Data models
/// - `security`: Password policy, salted hashing, signed tokens
/// - `validators`: Login state machine and user-mutation rules
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod security;
pub mod telemetry;
pub mod validators;

// Re-export commonly used types
pub use error::{ErrorDTO, IdentityError, Result};
pub use http::RequestContext;

use std::sync::Arc;

use crate::config::Settings;
use crate::db::users::UserDirectory;
use crate::security::TokenIssuer;

/// Shared application state: the user directory collaborator, the token
/// issuer holding the immutable key material, and settings.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserDirectory>,
    pub tokens: Arc<TokenIssuer>,
    pub settings: Arc<Settings>,
}
