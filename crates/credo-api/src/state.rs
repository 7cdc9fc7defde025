//! Application state shared across all handlers and middleware.

use std::fmt;
use std::sync::Arc;

use credo_auth::jwt::{JwtDecoder, JwtEncoder};
use credo_auth::password::PasswordHasher;
use credo_auth::session::SessionCookies;
use credo_core::config::AppConfig;
use credo_core::error::AppError;
use credo_database::UserStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// User persistence
    pub store: Arc<dyn UserStore>,
    /// Password hasher (Argon2id)
    pub password_hasher: Arc<PasswordHasher>,
    /// Session token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Session token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Session cookie helper
    pub session_cookies: Arc<SessionCookies>,
}

impl AppState {
    /// Builds every auth component from configuration.
    ///
    /// Fails on a missing signing secret or unusable password parameters.
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> Result<Self, AppError> {
        let password_hasher = PasswordHasher::new(&config.password)?;
        let jwt_encoder = JwtEncoder::new(&config.auth)?;
        let jwt_decoder = JwtDecoder::new(&config.auth)?;
        let session_cookies = SessionCookies::new(&config.session);

        Ok(Self {
            config: Arc::new(config),
            store,
            password_hasher: Arc::new(password_hasher),
            jwt_encoder: Arc::new(jwt_encoder),
            jwt_decoder: Arc::new(jwt_decoder),
            session_cookies: Arc::new(session_cookies),
        })
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("password_hasher", &self.password_hasher)
            .field("session_cookies", &self.session_cookies)
            .finish_non_exhaustive()
    }
}
