//! Integration tests for the session cookie middleware.

mod helpers;

use chrono::Utc;
use http::{StatusCode, header};

use credo_auth::jwt::JwtEncoder;
use credo_core::types::UserId;
use credo_database::UserStore;

use helpers::TestApp;

#[tokio::test]
async fn test_current_user_with_cookie() {
    let app = TestApp::new();
    let cookie = app.register_and_login("alice").await;

    let response = app
        .request("GET", "/v1/auth/current", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["id"], 1);
    assert!(response.body["created_at"].as_str().unwrap().ends_with('Z'));
    assert!(response.body.get("updated_at").is_none());
    assert!(response.body.get("password_hash").is_none());
    assert_eq!(
        response.header(header::CACHE_CONTROL),
        Some("max-age=0,private,must-revalidate")
    );
}

#[tokio::test]
async fn test_current_user_distinguishes_users() {
    let app = TestApp::new();
    let _alice = app.register_and_login("alice").await;
    let bob = app.register_and_login("bob").await;

    let response = app.request("GET", "/v1/auth/current", None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "bob");
    assert_eq!(response.body["id"], 2);
}

#[tokio::test]
async fn test_current_user_without_cookie() {
    let app = TestApp::new();
    app.register_and_login("alice").await;

    let response = app.request("GET", "/v1/auth/current", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.header(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_garbage_and_tampered_cookies_rejected() {
    let app = TestApp::new();
    let cookie = app.register_and_login("alice").await;

    let signature_start = cookie.rfind('.').unwrap() + 1;
    let mut bytes = cookie.clone().into_bytes();
    let target = signature_start + 5;
    bytes[target] = if bytes[target] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    for value in [
        "token=garbage".to_string(),
        "token=".to_string(),
        "other=value".to_string(),
        tampered,
    ] {
        let response = app
            .request("GET", "/v1/auth/current", None, Some(&value))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{value}");
    }
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new();
    app.register_and_login("alice").await;

    let encoder = JwtEncoder::new(&app.config.auth).unwrap();
    let issued = encoder
        .issue_at(
            UserId::new(1).unwrap(),
            "alice",
            Utc::now().timestamp() - 73 * 3600,
        )
        .unwrap();

    let cookie = format!("token={}", issued.token);
    let response = app
        .request("GET", "/v1/auth/current", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_user_rejected() {
    let app = TestApp::new();

    let encoder = JwtEncoder::new(&app.config.auth).unwrap();
    let issued = encoder.issue(UserId::new(99).unwrap(), "ghost").unwrap();
    assert!(app.store.find_by_id(UserId::new(99).unwrap()).await.unwrap().is_none());

    let cookie = format!("token={}", issued.token);
    let response = app
        .request("GET", "/v1/auth/current", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = TestApp::new();
    app.register_and_login("alice").await;

    let mut foreign = app.config.auth.clone();
    foreign.jwt_secret = "some-other-secret".to_string();
    let issued = JwtEncoder::new(&foreign)
        .unwrap()
        .issue(UserId::new(1).unwrap(), "alice")
        .unwrap();

    let cookie = format!("token={}", issued.token);
    let response = app
        .request("GET", "/v1/auth/current", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
