//! Claims carried by session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use credo_core::types::{UserId, UserIdParseError};

/// Identity claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Issuer.
    pub iss: String,
    /// Subject: the user id as a decimal string.
    pub sub: String,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Not-before (seconds since epoch).
    pub nbf: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
    /// Display name.
    pub name: String,
}

impl IdentityClaims {
    /// Parse the subject as a user id.
    pub fn user_id(&self) -> Result<UserId, UserIdParseError> {
        self.sub.parse()
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the claims are within their validity window at `now`.
    pub fn is_active_at(&self, now: i64) -> bool {
        self.nbf <= now && now < self.exp
    }
}
