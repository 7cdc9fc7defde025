//! Authentication component errors.

use thiserror::Error;

use credo_core::error::{AppError, ErrorKind};

/// Failures raised while building or running the auth components.
///
/// Credential and token rejections are not errors here; they surface as
/// [`crate::HashValidationResult::Invalid`] and [`crate::TokenRejected`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// The operating system random source could not produce bytes.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    /// The key derivation function rejected its inputs.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
    /// No usable token signing secret was configured.
    #[error("token signing key is missing")]
    SigningKeyMissing,
    /// The configured hash parameters cannot be used.
    #[error("invalid password hash parameters: {0}")]
    InvalidHashParameters(String),
    /// A token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Whether the error stems from startup configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::SigningKeyMissing | Self::InvalidHashParameters(_)
        )
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = if err.is_configuration() {
            ErrorKind::Configuration
        } else {
            ErrorKind::Internal
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
