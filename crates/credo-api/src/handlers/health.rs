//! Health check handler.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::response::{HealthCheckInfo, HealthCheckResponse, HealthStatus, format_duration};
use crate::state::AppState;

/// GET /v1/health
pub async fn health(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let start = Instant::now();

    let db_start = Instant::now();
    let (db_status, description) = match state.store.health_check().await {
        Ok(()) => (HealthStatus::Healthy, "Pinged database"),
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            (HealthStatus::Unhealthy, "Database ping failed")
        }
    };
    let database = HealthCheckInfo {
        key: "Database".to_string(),
        status: db_status,
        description: description.to_string(),
        duration: format_duration(db_start.elapsed()),
    };

    Json(HealthCheckResponse {
        status: db_status,
        duration: format_duration(start.elapsed()),
        info: vec![database],
    })
}
