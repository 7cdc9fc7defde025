//! Session cookie construction and extraction.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;
use tracing::warn;

use credo_core::config::SessionConfig;

use crate::jwt::IssuedToken;

/// Places session tokens into cookies and reads them back.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    name: String,
    secure: bool,
}

impl SessionCookies {
    /// Creates a cookie helper from session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: config.secure_cookie,
        }
    }

    /// Name of the session cookie.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add the session cookie for `issued` to the outgoing jar.
    ///
    /// The cookie expires together with the token it carries.
    pub fn attach(&self, jar: CookieJar, issued: &IssuedToken) -> CookieJar {
        let mut cookie = Cookie::build((self.name.clone(), issued.token.clone()))
            .secure(self.secure)
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .build();

        match OffsetDateTime::from_unix_timestamp(issued.claims.exp) {
            Ok(expires) => cookie.set_expires(expires),
            Err(e) => warn!(error = %e, "Token expiry is not representable as a cookie date"),
        }

        jar.add(cookie)
    }

    /// Read the session token from an incoming jar.
    pub fn extract(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name).map(|cookie| cookie.value().to_string())
    }
}
