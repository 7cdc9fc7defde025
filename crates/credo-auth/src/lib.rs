//! # credo-auth
//!
//! Credential verification and session issuance for Credo.
//!
//! ## Modules
//!
//! - `password`: Argon2id hash codec, key derivation, and the password hasher
//! - `jwt`: HS256 session token issuance and verification
//! - `session`: Session cookie delivery
//! - `error`: Construction and runtime failures of the above

pub mod error;
pub mod jwt;
pub mod password;
pub mod session;

pub use error::AuthError;
pub use jwt::{IdentityClaims, IssuedToken, JwtDecoder, JwtEncoder, TokenRejected};
pub use password::{HashParams, HashValidationResult, PasswordHasher};
pub use session::SessionCookies;
