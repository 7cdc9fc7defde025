//! Typed identifier for user accounts.
//!
//! User ids are database-assigned positive integers. They travel inside
//! session tokens as decimal strings, so parsing is strict: only a plain
//! decimal number greater than zero is accepted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct UserId(i64);

/// Error returned when a string is not a valid [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdParseError {
    /// The string is not a decimal integer.
    #[error("user id is not a decimal integer")]
    NotNumeric,
    /// The integer is zero or negative.
    #[error("user id must be positive")]
    NotPositive,
}

impl UserId {
    /// Wrap a raw database id. Returns `None` for zero or negative values.
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Return the inner integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UserIdParseError::NotNumeric);
        }
        let raw: i64 = s.parse().map_err(|_| UserIdParseError::NotNumeric)?;
        Self::new(raw).ok_or(UserIdParseError::NotPositive)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserIdParseError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(UserIdParseError::NotPositive)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> i64 {
        id.0
    }
}
