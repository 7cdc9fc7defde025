//! `AuthUser` extractor: reads the identity placed by the session middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use credo_core::types::UserId;

use crate::error::ApiError;

/// Request extension inserted by [`crate::middleware::auth::require_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Authenticated user id available in handlers behind the session middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl AuthUser {
    /// Returns the authenticated user's id.
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .map(|AuthenticatedUser(id)| AuthUser(*id))
            .ok_or(ApiError::Unauthenticated)
    }
}
