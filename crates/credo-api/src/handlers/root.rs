//! Greeting endpoint.

use axum::Json;

use crate::dto::response::MessageResponse;

/// GET /v1/
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}
