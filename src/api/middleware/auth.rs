//! Token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::entities::User, error::AppError, state::AppState};

/// Header carrying the API token.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The user resolved from the request token.
///
/// Inserted into request extensions by [`layer`]; handlers behind the
/// middleware take it as an extractor.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::MissingToken)
    }
}

/// Authenticates requests by their API token.
///
/// # Header Format
///
/// ```text
/// x-api-key: <token>
/// ```
///
/// `Authorization: Bearer <token>` is accepted when `x-api-key` is absent.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the token is missing, unknown or expired,
/// and `500 Internal Server Error` if the user store cannot be reached.
/// The wrapped handler never runs unless validation succeeded.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/links", get(links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match api_key(&parts.headers) {
        Some(token) => Some(token),
        None => AuthBearer::from_request_parts(&mut parts, &())
            .await
            .ok()
            .map(|AuthBearer(token)| token),
    };

    let token = token.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let user = st
        .token_service
        .validate(token)
        .await
        .map_err(|e| {
            if e.is_auth_error() {
                tracing::debug!(code = e.code(), "Request rejected by token check");
            }
            e.context("Failed to validate token")
        })?;

    parts.extensions.insert(AuthenticatedUser(user));

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn api_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_api_key_read() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("abc"));

        assert_eq!(api_key(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("   "));

        assert!(api_key(&headers).is_none());
        assert!(api_key(&HeaderMap::new()).is_none());
    }
}
