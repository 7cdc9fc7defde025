//! Auth handlers: register, login, current user.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, info, warn};

use credo_auth::password::HashValidationResult;
use credo_core::error::AppError;
use credo_entity::user::CreateUser;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::CurrentUserResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidateJson};
use crate::state::AppState;

/// Where a newly registered user can fetch their details.
pub const CURRENT_USER_LOCATION: &str = "/v1/auth/current";

const REGISTRATION_FAILED: &str = "Cannot create user with the information provided";

/// POST /v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidateJson(req): ValidateJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let password_hash = hash_password(&state, req.password).await?;

    let user = state
        .store
        .create(&CreateUser::new(req.username, password_hash))
        .await
        .map_err(|e| {
            warn!(error = %e, "User registration failed");
            ApiError::bad_request(REGISTRATION_FAILED)
        })?;

    info!(user_id = %user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, CURRENT_USER_LOCATION)],
    ))
}

/// POST /v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidateJson(req): ValidateJson<LoginRequest>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let user = state
        .store
        .find_by_username(&req.username)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "User lookup failed during login");
            None
        });

    // The hasher runs whether or not the user exists.
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let hasher = state.password_hasher.clone();
    let password = req.password;
    let (result, password) = tokio::task::spawn_blocking(move || {
        let result = hasher.verify(&password, stored.as_deref());
        (result, password)
    })
    .await
    .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?;

    let user = match user {
        Some(user) if result.is_valid() && user.can_login() => user,
        _ => {
            debug!("Login rejected");
            return Err(ApiError::Unauthenticated);
        }
    };

    if result == HashValidationResult::ValidRehashNeeded {
        let rehashed = hash_password(&state, password).await?;
        match state.store.update_password_hash(user.id, &rehashed).await {
            Ok(()) => info!(user_id = %user.id, "Password hash upgraded"),
            Err(e) => warn!(user_id = %user.id, error = %e, "Failed to persist upgraded password hash"),
        }
    }

    let issued = state
        .jwt_encoder
        .issue(user.id, &user.username)
        .map_err(AppError::from)?;

    info!(user_id = %user.id, "User logged in");
    Ok((state.session_cookies.attach(jar, &issued), StatusCode::NO_CONTENT))
}

/// GET /v1/auth/current
pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CurrentUserResponse>, ApiError> {
    let user = state
        .store
        .find_by_id(auth.user_id())
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(CurrentUserResponse::from(&user)))
}

async fn hash_password(state: &AppState, password: String) -> Result<String, ApiError> {
    let hasher = state.password_hasher.clone();
    let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(AppError::from)?;
    Ok(hashed)
}
