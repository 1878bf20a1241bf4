#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use http_body_util::BodyExt;
use tower::ServiceExt;

use aeminium_identity::{
    config::{JwtSettings, LocaleSettings, ServerSettings, Settings},
    db::users::{CreateUser, InMemoryUserDirectory, UserDirectory},
    http,
    models::{Language, RoleName, User},
    security::{generate_salt, salted_hash, TokenIssuer},
    AppState,
};

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        jwt: JwtSettings {
            private_key_path: "keys/identity_dev_private.pem".to_string(),
            public_key_path: "keys/identity_dev_public.pem".to_string(),
        },
        locale: LocaleSettings {
            default_language: Language::PtPt,
        },
    }
}

pub fn test_state() -> (AppState, Arc<InMemoryUserDirectory>) {
    let settings = test_settings();
    let directory = Arc::new(InMemoryUserDirectory::new());
    let tokens = Arc::new(TokenIssuer::load(&settings.jwt).expect("dev keypair should load"));

    let state = AppState {
        users: directory.clone(),
        tokens,
        settings: Arc::new(settings),
    };

    (state, directory)
}

pub fn test_app() -> (Router, AppState, Arc<InMemoryUserDirectory>) {
    let (state, directory) = test_state();
    (http::build_router(state.clone()), state, directory)
}

pub async fn seed_user(
    directory: &InMemoryUserDirectory,
    name: &str,
    email: &str,
    password: &str,
    roles: Vec<RoleName>,
) -> User {
    let salt = generate_salt();
    directory
        .create(CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            language: Language::DEFAULT,
            roles,
            salt: salt.clone(),
            password_hash: salted_hash(&salt, password),
        })
        .await
        .expect("seeding should not collide")
}

pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{email}:{password}")))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("request should run")
}

pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn response_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

pub async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/login")
        .header(header::AUTHORIZATION, basic_auth(email, password))
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");

    let body = response_json(response).await;
    body["token"].as_str().expect("token in body").to_string()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
