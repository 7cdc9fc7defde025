//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum_extra::extract::cookie::Cookie;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use credo_api::{AppState, build_app};
use credo_core::config::{AppConfig, PasswordConfig, StoreBackend};
use credo_database::{MemoryUserStore, UserStore};

/// Signing secret used by every test application.
pub const TEST_SECRET: &str = "integration-test-secret";

/// A password inside the accepted 16..=64 range.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory user store shared with the router
    pub store: MemoryUserStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application backed by an empty in-memory store.
    pub fn new() -> Self {
        let store = MemoryUserStore::new();
        let config = test_config();
        let router = Self::router_with(config.clone(), Arc::new(store.clone()));
        Self {
            router,
            store,
            config,
        }
    }

    /// Build a router over an arbitrary store.
    pub fn router_with(config: AppConfig, store: Arc<dyn UserStore>) -> Router {
        let state = AppState::new(config, store).expect("Failed to build app state");
        build_app(state)
    }

    /// Send a JSON request, optionally carrying a session cookie (`name=value`).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prebuilt request.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        send(&self.router, req).await
    }

    /// Register a user and assert it succeeded.
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .request(
                "POST",
                "/v1/auth/register",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    }

    /// Log in and return the raw login response.
    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/v1/auth/login",
            Some(serde_json::json!({ "username": username, "password": password })),
            None,
        )
        .await
    }

    /// Register then log in, returning the `name=value` cookie pair.
    pub async fn register_and_login(&self, username: &str) -> String {
        self.register(username, TEST_PASSWORD).await;
        let response = self.login(username, TEST_PASSWORD).await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        let cookie = response.session_cookie().expect("login sets a cookie");
        format!("{}={}", cookie.name(), cookie.value())
    }
}

/// Send a request through a router and collect the response.
pub async fn send(router: &Router, req: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Config with cheap password parameters and a fixed secret.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = StoreBackend::Memory;
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.password = PasswordConfig {
        memory_cost_kib: 8,
        time_cost: 1,
        parallelism: 1,
        salt_length: 16,
        key_length: 32,
    };
    config
}

/// Test response wrapper
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Parse the `Set-Cookie` header, if present.
    pub fn session_cookie(&self) -> Option<Cookie<'static>> {
        let raw = self.headers.get(header::SET_COOKIE)?.to_str().ok()?;
        Cookie::parse(raw.to_string()).ok()
    }

    /// Header value as a string.
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
