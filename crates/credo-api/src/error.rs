//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use credo_core::error::{AppError, ErrorKind};

/// Problem type reported for malformed requests.
pub const BAD_REQUEST_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.1";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Problem-style body for `400 Bad Request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// What was wrong with the request.
    pub errors: serde_json::Value,
}

/// Errors returned by handlers, middleware and extractors.
#[derive(Debug)]
pub enum ApiError {
    /// Credentials or session were missing or not accepted. Always the same response.
    Unauthenticated,
    /// The request could not be decoded or validated.
    BadRequest(serde_json::Value),
    /// Any other application failure.
    App(AppError),
}

impl ApiError {
    /// A bad request carrying a single message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(serde_json::Value::String(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ApiErrorResponse {
                    error: "UNAUTHENTICATED".to_string(),
                    message: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::BadRequest(errors) => {
                let body = ProblemDetails {
                    problem_type: BAD_REQUEST_TYPE.to_string(),
                    title: "Bad Request".to_string(),
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    errors,
                };
                (
                    StatusCode::BAD_REQUEST,
                    [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
                    Json(body),
                )
                    .into_response()
            }
            Self::App(err) => app_error_response(err),
        }
    }
}

fn app_error_response(err: AppError) -> Response {
    let (status, error_code) = match err.kind {
        ErrorKind::Authentication => return ApiError::Unauthenticated.into_response(),
        ErrorKind::Validation => return ApiError::bad_request(err.message).into_response(),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => {
            tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    let message = if err.is_server_error() {
        "An internal error occurred".to_string()
    } else {
        err.message
    };

    (
        status,
        Json(ApiErrorResponse {
            error: error_code.to_string(),
            message,
        }),
    )
        .into_response()
}
