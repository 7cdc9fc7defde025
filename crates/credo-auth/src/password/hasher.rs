//! Argon2id password hashing and verification.
//!
//! Verification performs exactly one key derivation on every path. Unknown
//! users and unreadable stored hashes are checked against a placeholder hash
//! built at construction time, so the response time does not reveal which
//! case occurred.

use std::fmt;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use credo_core::config::PasswordConfig;

use crate::error::AuthError;

use super::codec::{self, DecodedHash, HashParams};
use super::kdf::{Argon2idKdf, KeyDerivation};

/// Upper bound on memory cost accepted from stored hashes (4 GiB in KiB).
pub const MAX_MEMORY_COST_KIB: u32 = 4 * 1024 * 1024;
/// Upper bound on time cost accepted from stored hashes.
pub const MAX_TIME_COST: u32 = 1024;
/// Upper bound on parallelism accepted from stored hashes.
pub const MAX_PARALLELISM: u32 = 255;
/// Upper bound on salt and digest lengths, in bytes.
pub const MAX_COMPONENT_LENGTH: usize = 1024;

const PLACEHOLDER_PASSWORD_LENGTH: usize = 32;

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashValidationResult {
    /// Password matches and the hash uses the current parameters.
    Valid,
    /// Password matches but the hash should be recomputed with the current parameters.
    ValidRehashNeeded,
    /// Password does not match, or there was nothing usable to match against.
    Invalid,
}

impl HashValidationResult {
    /// Whether the password was accepted.
    pub fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Hashes and verifies passwords.
pub struct PasswordHasher<K = Argon2idKdf> {
    kdf: K,
    target: HashParams,
    placeholder: DecodedHash,
}

impl PasswordHasher<Argon2idKdf> {
    /// Creates an Argon2id hasher targeting the configured parameters.
    pub fn new(config: &PasswordConfig) -> Result<Self, AuthError> {
        Self::with_kdf(Argon2idKdf, HashParams::from(config))
    }
}

impl<K: KeyDerivation> PasswordHasher<K> {
    /// Creates a hasher over an arbitrary key derivation function.
    ///
    /// Fails when the target parameters are outside the safety limits or
    /// rejected by the KDF.
    pub fn with_kdf(kdf: K, target: HashParams) -> Result<Self, AuthError> {
        if !within_limits(&target) {
            return Err(AuthError::InvalidHashParameters(
                "parameters exceed the supported limits".to_string(),
            ));
        }
        kdf.check(&target)?;

        let mut throwaway = [0u8; PLACEHOLDER_PASSWORD_LENGTH];
        fill_random(&mut throwaway)?;
        let placeholder = derive_hash(&kdf, &throwaway, &target)?;

        Ok(Self {
            kdf,
            target,
            placeholder,
        })
    }

    /// Parameters used for every newly computed hash.
    pub fn target_params(&self) -> HashParams {
        self.target
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let hashed = derive_hash(&self.kdf, password.as_bytes(), &self.target)?;
        Ok(codec::encode(&hashed.digest, &hashed.salt, &hashed.params))
    }

    /// Verify a password against a stored hash, if any.
    pub fn verify(&self, password: &str, stored: Option<&str>) -> HashValidationResult {
        let decoded = stored.and_then(|encoded| self.usable(encoded));
        let genuine = decoded.is_some();
        let candidate = decoded.as_ref().unwrap_or(&self.placeholder);

        let computed = match self.kdf.derive(
            password.as_bytes(),
            &candidate.salt,
            &candidate.params,
        ) {
            Ok(digest) => digest,
            Err(e) => {
                warn!(error = %e, "Key derivation failed during verification");
                return HashValidationResult::Invalid;
            }
        };

        let matches: bool = computed.ct_eq(&candidate.digest).into();
        if !genuine || !matches {
            return HashValidationResult::Invalid;
        }

        if candidate.params == self.target {
            HashValidationResult::Valid
        } else {
            HashValidationResult::ValidRehashNeeded
        }
    }

    fn usable(&self, encoded: &str) -> Option<DecodedHash> {
        let decoded = match codec::decode(encoded) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(error = %e, "Stored password hash is unreadable");
                return None;
            }
        };

        if !within_limits(&decoded.params) || self.kdf.check(&decoded.params).is_err() {
            debug!("Stored password hash parameters are unsupported");
            return None;
        }
        Some(decoded)
    }
}

impl<K> fmt::Debug for PasswordHasher<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

fn within_limits(params: &HashParams) -> bool {
    params.memory_cost <= MAX_MEMORY_COST_KIB
        && params.time_cost <= MAX_TIME_COST
        && params.parallelism <= MAX_PARALLELISM
        && params.salt_length <= MAX_COMPONENT_LENGTH
        && params.key_length <= MAX_COMPONENT_LENGTH
}

fn fill_random(buf: &mut [u8]) -> Result<(), AuthError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| AuthError::EntropyUnavailable(e.to_string()))
}

fn derive_hash<K: KeyDerivation>(
    kdf: &K,
    password: &[u8],
    params: &HashParams,
) -> Result<DecodedHash, AuthError> {
    let mut salt = vec![0u8; params.salt_length];
    fill_random(&mut salt)?;
    let digest = kdf.derive(password, &salt, params)?;
    Ok(DecodedHash {
        digest,
        salt,
        params: *params,
    })
}
