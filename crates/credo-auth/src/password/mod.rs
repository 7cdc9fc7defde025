//! Argon2id password hashing.

pub mod codec;
pub mod hasher;
pub mod kdf;

pub use codec::{DecodedHash, HashDecodeError, HashParams};
pub use hasher::{HashValidationResult, PasswordHasher};
pub use kdf::{Argon2idKdf, KeyDerivation};
