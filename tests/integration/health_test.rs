//! Integration tests for the health endpoint.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;

use credo_core::error::AppError;
use credo_core::result::AppResult;
use credo_core::types::UserId;
use credo_database::UserStore;
use credo_entity::user::{CreateUser, User};

use helpers::{TestApp, send, test_config};

/// A store whose backend is unreachable.
struct UnreachableStore;

#[async_trait]
impl UserStore for UnreachableStore {
    async fn find_by_id(&self, _id: UserId) -> AppResult<Option<User>> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_username(&self, _username: &str) -> AppResult<Option<User>> {
        Err(AppError::database("connection refused"))
    }

    async fn create(&self, _data: &CreateUser) -> AppResult<User> {
        Err(AppError::database("connection refused"))
    }

    async fn update_password_hash(&self, _id: UserId, _password_hash: &str) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn health_check(&self) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }
}

fn is_duration(value: &serde_json::Value) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };
    let bytes = text.as_bytes();
    bytes.len() == 15
        && bytes[2] == b':'
        && bytes[5] == b':'
        && bytes[8] == b'.'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 2 | 5 | 8) || b.is_ascii_digit())
}

#[tokio::test]
async fn test_health_healthy() {
    let app = TestApp::new();

    let response = app.request("GET", "/v1/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "Healthy");
    assert!(is_duration(&response.body["duration"]));

    let info = response.body["info"].as_array().unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0]["key"], "Database");
    assert_eq!(info[0]["status"], "Healthy");
    assert!(is_duration(&info[0]["duration"]));
}

#[tokio::test]
async fn test_health_unhealthy_store() {
    let router = TestApp::router_with(test_config(), Arc::new(UnreachableStore));

    let req = http::Request::builder()
        .uri("/v1/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(&router, req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "Unhealthy");
    assert_eq!(response.body["info"][0]["status"], "Unhealthy");
}

#[tokio::test]
async fn test_store_outage_fails_login_and_registration_safely() {
    let router = TestApp::router_with(test_config(), Arc::new(UnreachableStore));

    let login = http::Request::builder()
        .method("POST")
        .uri("/v1/auth/login")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"username":"alice","password":"correct-horse-battery"}"#,
        ))
        .unwrap();
    assert_eq!(send(&router, login).await.status, StatusCode::UNAUTHORIZED);

    let register = http::Request::builder()
        .method("POST")
        .uri("/v1/auth/register")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"username":"alice","password":"correct-horse-battery"}"#,
        ))
        .unwrap();
    assert_eq!(send(&router, register).await.status, StatusCode::BAD_REQUEST);
}
