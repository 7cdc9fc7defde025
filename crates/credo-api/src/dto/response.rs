//! Response DTOs.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use credo_entity::user::User;

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}

/// The authenticated user's details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    /// User id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Creation time, RFC 3339 with second precision.
    pub created_at: String,
    /// Last update time, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            username: user.username.clone(),
            created_at: format_timestamp(&user.created_at),
            updated_at: user.updated_at.as_ref().map(format_timestamp),
        }
    }
}

/// Health of a single dependency or of the whole service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Working.
    Healthy,
    /// Not working.
    Unhealthy,
}

/// Health report for one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckInfo {
    /// Dependency name.
    pub key: String,
    /// Dependency status.
    pub status: HealthStatus,
    /// What was checked.
    pub description: String,
    /// Time spent checking, `HH:MM:SS.ffffff`.
    pub duration: String,
}

/// Overall health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Total time spent, `HH:MM:SS.ffffff`.
    pub duration: String,
    /// Per-dependency reports.
    pub info: Vec<HealthCheckInfo>,
}

fn format_timestamp(value: &DateTime<Utc>) -> String {
    value
        .round_subsecs(0)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render a duration as `HH:MM:SS.ffffff`.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:06}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        duration.subsec_micros()
    )
}
