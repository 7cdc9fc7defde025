//! Session token verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;
use tracing::debug;

use credo_core::config::AuthConfig;
use credo_core::types::UserId;

use crate::error::AuthError;

use super::checked_secret;
use super::claims::IdentityClaims;
use super::encoder::TOKEN_ISSUER;

/// A token was missing or not acceptable. Carries no detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session token rejected")]
pub struct TokenRejected;

/// Validates HS256 session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let secret = checked_secret(&config.jwt_secret)?;

        // Time bounds are checked in `verify_at` against an explicit clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["iss", "sub", "exp", "nbf"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Verifies a token and returns the user it identifies.
    pub fn verify(&self, token: Option<&str>) -> Result<UserId, TokenRejected> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies a token as if the current time were `now` (seconds since epoch).
    pub fn verify_at(&self, token: Option<&str>, now: i64) -> Result<UserId, TokenRejected> {
        let Some(token) = token else {
            debug!("Session token missing");
            return Err(TokenRejected);
        };

        let claims = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Session token failed validation");
                TokenRejected
            })?
            .claims;

        if !claims.is_active_at(now) {
            debug!(nbf = claims.nbf, exp = claims.exp, now, "Session token outside validity window");
            return Err(TokenRejected);
        }

        claims.user_id().map_err(|e| {
            debug!(error = %e, "Session token subject is not a user id");
            TokenRejected
        })
    }
}
