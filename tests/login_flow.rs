/// End-to-end login flow: Basic credentials in, signed token out, and the
/// ordered error list on every failure path.
mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;

use aeminium_identity::models::RoleName;
use aeminium_identity::security::TOKEN_VALIDITY_DAYS;

#[tokio::test]
async fn login_success_returns_signed_token() {
    let (app, state, directory) = test_app();
    let seeded = seed_user(
        &directory,
        "Carlos",
        "carlos@example.com",
        "secret123",
        vec![RoleName::Scholar],
    )
    .await;

    let token = login_token(&app, "carlos@example.com", "secret123").await;
    assert!(!token.is_empty());

    let claims = state.tokens.verify(&token).expect("token should verify");
    assert_eq!(claims.sub, seeded.id.to_string());
    assert_eq!(claims.upn, "Carlos");
    assert_eq!(claims.iss, "aeminium-identity");
    assert_eq!(claims.groups, vec!["SCHOLAR"]);
    assert_eq!(claims.exp - claims.iat, TOKEN_VALIDITY_DAYS * 24 * 60 * 60);
}

#[tokio::test]
async fn login_without_authorization_header_is_code_1() {
    let (app, _state, _directory) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/login")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body[0]["code"], 1);
}

#[tokio::test]
async fn login_without_password_segment_is_code_2() {
    let (app, _state, _directory) = test_app();

    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    let request = Request::builder()
        .method("POST")
        .uri("/v1/login")
        .header(
            header::AUTHORIZATION,
            format!("Basic {}", BASE64.encode("carlos@example.com")),
        )
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body[0]["code"], 2);
    assert_eq!(body[0]["description"], "Missing parameter: password");
}

#[tokio::test]
async fn login_with_wrong_password_is_code_3() {
    let (app, _state, directory) = test_app();
    seed_user(
        &directory,
        "Carlos",
        "carlos@example.com",
        "secret123",
        vec![RoleName::Student],
    )
    .await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/login")
        .header(
            header::AUTHORIZATION,
            basic_auth("carlos@example.com", "wrong-guess"),
        )
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["code"], 3);
    assert_eq!(body[0]["description"], "Invalid login credentials");
}

#[tokio::test]
async fn login_with_unknown_email_is_code_4() {
    let (app, _state, _directory) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/login")
        .header(
            header::AUTHORIZATION,
            basic_auth("ghost@example.com", "secret123"),
        )
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body[0]["code"], 4);
}

#[tokio::test]
async fn login_for_user_without_salt_is_code_5() {
    let (app, _state, directory) = test_app();
    let mut user = seed_user(
        &directory,
        "Carlos",
        "carlos@example.com",
        "secret123",
        vec![RoleName::Student],
    )
    .await;

    use aeminium_identity::db::users::UserDirectory as _;
    user.salt = None;
    user.password_hash = None;
    directory.update(user).await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/login")
        .header(
            header::AUTHORIZATION,
            basic_auth("carlos@example.com", "secret123"),
        )
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body[0]["code"], 5);
}

#[tokio::test]
async fn issued_token_grants_access_to_reader_routes() {
    let (app, _state, directory) = test_app();
    let scholar = seed_user(
        &directory,
        "Marta",
        "marta@example.com",
        "secret123",
        vec![RoleName::Scholar],
    )
    .await;

    let token = login_token(&app, "marta@example.com", "secret123").await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/v1/users/{}", scholar.id))
        .header(header::AUTHORIZATION, bearer(&token))
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["id"], scholar.id);
    assert_eq!(body["email"], "marta@example.com");
    // Credential material never leaves the service.
    assert!(body.get("salt").is_none());
    assert!(body.get("passwordHash").is_none());
}
