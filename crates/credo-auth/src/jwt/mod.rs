//! Session token issuance and verification.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::IdentityClaims;
pub use decoder::{JwtDecoder, TokenRejected};
pub use encoder::{IssuedToken, JwtEncoder, TOKEN_ISSUER};

use crate::error::AuthError;

/// Reject secrets that are empty or only whitespace.
pub(crate) fn checked_secret(secret: &str) -> Result<&[u8], AuthError> {
    if secret.trim().is_empty() {
        return Err(AuthError::SigningKeyMissing);
    }
    Ok(secret.as_bytes())
}
