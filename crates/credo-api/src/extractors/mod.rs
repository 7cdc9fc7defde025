//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, AuthenticatedUser};
pub use json::ValidateJson;
