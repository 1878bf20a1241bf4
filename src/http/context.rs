/// Per-request context pipeline.
///
/// Every request passes three filters in a fixed order before any handler
/// runs: language resolution, client-app metadata extraction, and bearer
/// token subject loading. Each filter writes exactly one slice of the
/// `RequestContext`; the finished value is attached to the request and is
/// read-only from then on.
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::IdentityError;
use crate::models::{Language, RoleName};
use crate::AppState;

pub const REQUEST_HEADER_LANGUAGE: &str = "aem-language";
pub const REQUEST_HEADER_APP_NAME: &str = "aem-app";
pub const REQUEST_HEADER_APP_VERSION: &str = "aem-app-version";

const APP_NAME_FALLBACK: &str = "N/A";
const APP_VERSION_FALLBACK: &str = "0.0";

/// Client application metadata advertised by the caller.
#[derive(Debug, Clone)]
pub struct ClientApplicationData {
    pub name: String,
    pub version: String,
}

/// Caller identity proven by a bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    pub user_id: i64,
    pub groups: Vec<RoleName>,
}

/// Request aggregate produced by the pipeline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub selected_language: Language,
    pub app: ClientApplicationData,
    pub caller: Option<AuthenticatedCaller>,
}

impl RequestContext {
    pub fn caller_id(&self) -> Option<i64> {
        self.caller.as_ref().map(|caller| caller.user_id)
    }

    pub fn caller_has_role(&self, role: RoleName) -> bool {
        self.caller
            .as_ref()
            .is_some_and(|caller| caller.groups.contains(&role))
    }
}

/// Runs the three filters in order and attaches the finished context.
///
/// Token subject loading is the only filter that can abort: a bearer token
/// whose subject no longer resolves to a user short-circuits every later
/// filter and the handler itself.
pub async fn request_context_pipeline(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let selected_language = resolve_language(
        request.headers_mut(),
        state.settings.locale.default_language,
    );

    let app = extract_app_metadata(request.headers());

    let caller = match load_token_subject(&state, request.headers()).await {
        Ok(caller) => caller,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(RequestContext {
        selected_language,
        app,
        caller,
    });

    next.run(request).await
}

/// Resolve the request language, falling back to the configured default,
/// and write the normalized tag back so every downstream reader agrees on
/// the value.
fn resolve_language(headers: &mut HeaderMap, default: Language) -> Language {
    let selected = headers
        .get(REQUEST_HEADER_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(Language::from_tag)
        .unwrap_or(default);

    headers.insert(
        REQUEST_HEADER_LANGUAGE,
        HeaderValue::from_static(selected.as_tag()),
    );

    selected
}

/// Client app name and version; absent values get sentinel defaults and
/// never fail the request.
fn extract_app_metadata(headers: &HeaderMap) -> ClientApplicationData {
    let name = headers
        .get(REQUEST_HEADER_APP_NAME)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(APP_NAME_FALLBACK)
        .to_string();

    let version = headers
        .get(REQUEST_HEADER_APP_VERSION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(APP_VERSION_FALLBACK)
        .to_string();

    ClientApplicationData { name, version }
}

/// Load the authenticated caller from a bearer token, if one is present.
///
/// Anonymous requests pass through untouched; role checks happen at the
/// resource level. The token was signed here, but the subject may have
/// been deleted since, so the directory is checked anyway.
async fn load_token_subject(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<AuthenticatedCaller>, IdentityError> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };

    let claims = state.tokens.verify(token)?;

    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| IdentityError::InvalidToken)?;

    if state.users.find_by_id(user_id).await?.is_none() {
        warn!(user_id, "Bearer token subject no longer resolves to a user");
        return Err(IdentityError::Forbidden);
    }

    let groups = claims
        .groups
        .iter()
        .filter_map(|group| RoleName::from_str(group))
        .collect();

    Ok(Some(AuthenticatedCaller { user_id, groups }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
