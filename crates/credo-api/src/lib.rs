//! # credo-api
//!
//! HTTP API layer for Credo built on Axum.
//!
//! Provides the `/v1` endpoints, the session middleware, extractors, DTOs,
//! and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
