//! JSON body extractor with content-type enforcement and validation.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Deserializes a JSON body and runs its `validator` rules.
///
/// Rejects with a problem-style `400` when the content type is not
/// `application/json`, the body does not parse, or validation fails.
#[must_use]
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(&req) {
            return Err(ApiError::bad_request(
                "Expected Content-Type of application/json",
            ));
        }

        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        data.validate()
            .map_err(|errors| ApiError::BadRequest(describe(&errors)))?;
        Ok(Self(data))
    }
}

fn has_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
}

/// Field name to list of messages.
fn describe(errors: &ValidationErrors) -> serde_json::Value {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Field '{field}' is invalid ({})", e.code))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    serde_json::json!(fields)
}
