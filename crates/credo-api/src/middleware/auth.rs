//! Session cookie authentication middleware.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::error::ApiError;
use crate::extractors::AuthenticatedUser;
use crate::state::AppState;

const NO_STORE_CACHE_CONTROL: &str = "max-age=0,private,must-revalidate";

/// Requires a valid session cookie.
///
/// On success the user id is stored as [`AuthenticatedUser`] in the request
/// extensions and the response is marked private. Otherwise the request is
/// answered with `401` and the handler never runs.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = state.session_cookies.extract(&jar);
    let Ok(user_id) = state.jwt_decoder.verify(token.as_deref()) else {
        return ApiError::Unauthenticated.into_response();
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser(user_id));

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(NO_STORE_CACHE_CONTROL),
    );
    response
}
