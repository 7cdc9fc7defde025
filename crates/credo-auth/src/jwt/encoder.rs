//! Session token creation.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use credo_core::config::AuthConfig;
use credo_core::types::UserId;

use crate::error::AuthError;

use super::checked_secret;
use super::claims::IdentityClaims;

/// Issuer written into, and required on, every session token.
pub const TOKEN_ISSUER: &str = "credo-api";

const SECONDS_PER_HOUR: i64 = 3600;

/// A signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Claims inside the token.
    pub claims: IdentityClaims,
}

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl_seconds: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let secret = checked_secret(&config.jwt_secret)?;
        let ttl_hours = i64::try_from(config.token_ttl_hours).map_err(|_| {
            AuthError::Signing(format!(
                "token ttl of {} hours is out of range",
                config.token_ttl_hours
            ))
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_seconds: ttl_hours.saturating_mul(SECONDS_PER_HOUR),
        })
    }

    /// Issues a token for the user, valid from now.
    pub fn issue(&self, user_id: UserId, display_name: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(user_id, display_name, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `now` (seconds since epoch).
    pub fn issue_at(
        &self,
        user_id: UserId,
        display_name: &str,
        now: i64,
    ) -> Result<IssuedToken, AuthError> {
        let claims = IdentityClaims {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(self.ttl_seconds),
            name: display_name.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 72,
        }
    }

    #[test]
    fn test_missing_secret() {
        assert!(matches!(
            JwtEncoder::new(&config("")),
            Err(AuthError::SigningKeyMissing)
        ));
        assert!(matches!(
            JwtEncoder::new(&config("   \t")),
            Err(AuthError::SigningKeyMissing)
        ));
    }

    #[test]
    fn test_issue_at_sets_claims() {
        let encoder = JwtEncoder::new(&config("test-secret")).unwrap();
        let issued = encoder
            .issue_at(UserId::new(42).unwrap(), "alice", 1_700_000_000)
            .unwrap();

        assert_eq!(issued.claims.iss, TOKEN_ISSUER);
        assert_eq!(issued.claims.sub, "42");
        assert_eq!(issued.claims.iat, 1_700_000_000);
        assert_eq!(issued.claims.nbf, 1_700_000_000);
        assert_eq!(issued.claims.exp, 1_700_000_000 + 72 * 3600);
        assert_eq!(issued.claims.name, "alice");
        assert_eq!(issued.token.split('.').count(), 3);
    }
}
