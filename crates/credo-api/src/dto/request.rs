//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 1, max = 256, message = "Username must be between 1 and 256 characters"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 16, max = 64, message = "Password must be between 16 and 64 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, max = 256, message = "Username must be between 1 and 256 characters"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 16, max = 64, message = "Password must be between 16 and 64 characters"))]
    pub password: String,
}
