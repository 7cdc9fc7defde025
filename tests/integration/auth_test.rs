//! Integration tests for registration and login.

mod helpers;

use axum::body::Body;
use axum_extra::extract::cookie::SameSite;
use chrono::Utc;
use http::{Request, StatusCode, header};

use credo_auth::password::{Argon2idKdf, HashParams, PasswordHasher, codec};
use credo_database::UserStore;
use credo_entity::user::CreateUser;

use helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_hello_world() {
    let app = TestApp::new();

    for path in ["/v1", "/v1/"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert_eq!(response.body["message"], "Hello World");
    }
}

#[tokio::test]
async fn test_register_stores_argon2id_hash() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/v1/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "password": "a".repeat(20),
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.header(header::LOCATION),
        Some("/v1/auth/current")
    );

    let user = app.store.find_by_username("alice").await.unwrap().unwrap();
    let segments: Vec<&str> = user.password_hash.split('$').collect();
    assert_eq!(segments.len(), 6);
    assert_eq!(segments[1], "argon2id");
    assert!(!user.password_hash.contains("a".repeat(20).as_str()));

    let decoded = codec::decode(&user.password_hash).unwrap();
    assert_eq!(decoded.params, HashParams::from(&app.config.password));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new();
    app.register("alice", TEST_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/v1/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "password": "another-long-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["title"], "Bad Request");
    assert_eq!(response.body["status"], 400);
    assert_eq!(
        response.body["errors"],
        "Cannot create user with the information provided"
    );
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_lengths() {
    let app = TestApp::new();

    for (username, password) in [
        ("alice".to_string(), "p".repeat(15)),
        ("alice".to_string(), "p".repeat(65)),
        (String::new(), "p".repeat(20)),
        ("u".repeat(257), "p".repeat(20)),
    ] {
        let response = app
            .request(
                "POST",
                "/v1/auth/register",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            Some("application/problem+json")
        );
        assert!(response.body["errors"].is_object());
    }
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_register_requires_json_content_type() {
    let app = TestApp::new();

    let req = Request::builder()
        .method("POST")
        .uri("/v1/auth/register")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(
            r#"{"username":"alice","password":"correct-horse-battery"}"#,
        ))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["errors"],
        "Expected Content-Type of application/json"
    );
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let app = TestApp::new();

    let req = Request::builder()
        .method("POST")
        .uri("/v1/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["title"], "Bad Request");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new();
    app.register("alice", TEST_PASSWORD).await;

    let response = app.login("alice", TEST_PASSWORD).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let cookie = response.session_cookie().expect("Set-Cookie header");
    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.value().split('.').count(), 3);
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.path(), Some("/"));

    let expires = cookie
        .expires_datetime()
        .expect("cookie has an expiry")
        .unix_timestamp();
    let expected = Utc::now().timestamp() + 72 * 3600;
    assert!((expires - expected).abs() <= 60, "{expires} vs {expected}");
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::new();
    app.register("alice", TEST_PASSWORD).await;

    let wrong_password = app.login("alice", "incorrect-horse-battery").await;
    let unknown_user = app.login("mallory", TEST_PASSWORD).await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert!(wrong_password.session_cookie().is_none());
    assert!(unknown_user.session_cookie().is_none());
}

#[tokio::test]
async fn test_login_with_corrupt_stored_hash_fails() {
    let app = TestApp::new();
    app.store
        .create(&CreateUser::new("alice", "$argon2id$v=19$broken"))
        .await
        .unwrap();

    let response = app.login("alice", TEST_PASSWORD).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_upgrades_outdated_hash() {
    let app = TestApp::new();

    let target = HashParams::from(&app.config.password);
    let outdated = PasswordHasher::with_kdf(
        Argon2idKdf,
        HashParams {
            time_cost: 2,
            salt_length: 8,
            ..target
        },
    )
    .unwrap();
    let old_hash = outdated.hash(TEST_PASSWORD).unwrap();
    app.store
        .create(&CreateUser::new("alice", old_hash.clone()))
        .await
        .unwrap();

    let response = app.login("alice", TEST_PASSWORD).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let user = app.store.find_by_username("alice").await.unwrap().unwrap();
    assert_ne!(user.password_hash, old_hash);
    assert_eq!(codec::decode(&user.password_hash).unwrap().params, target);
    assert!(user.updated_at.is_some());

    let again = app.login("alice", TEST_PASSWORD).await;
    assert_eq!(again.status, StatusCode::NO_CONTENT);
}
