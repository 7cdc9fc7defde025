//! Key derivation behind the password hasher.

use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::AuthError;

use super::codec::HashParams;

/// Argon2 refuses salts shorter than this.
const MIN_SALT_LENGTH: usize = 8;

/// A password key derivation function.
pub trait KeyDerivation: Send + Sync {
    /// Derive `params.key_length` bytes from a password and salt.
    fn derive(&self, password: &[u8], salt: &[u8], params: &HashParams)
    -> Result<Vec<u8>, AuthError>;

    /// Check that `params` can be fed to [`KeyDerivation::derive`].
    fn check(&self, params: &HashParams) -> Result<(), AuthError>;
}

/// Argon2id, version 0x13.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2idKdf;

impl Argon2idKdf {
    fn context(params: &HashParams) -> Result<Argon2<'static>, AuthError> {
        let argon_params = Params::new(
            params.memory_cost,
            params.time_cost,
            params.parallelism,
            Some(params.key_length),
        )
        .map_err(|e| AuthError::InvalidHashParameters(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params))
    }
}

impl KeyDerivation for Argon2idKdf {
    fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        params: &HashParams,
    ) -> Result<Vec<u8>, AuthError> {
        let argon2 = Self::context(params)?;
        let mut output = vec![0u8; params.key_length];
        argon2
            .hash_password_into(password, salt, &mut output)
            .map_err(|e| AuthError::KeyDerivation(e.to_string()))?;
        Ok(output)
    }

    fn check(&self, params: &HashParams) -> Result<(), AuthError> {
        if params.salt_length < MIN_SALT_LENGTH {
            return Err(AuthError::InvalidHashParameters(format!(
                "salt length must be at least {MIN_SALT_LENGTH} bytes"
            )));
        }
        Self::context(params).map(|_| ())
    }
}
