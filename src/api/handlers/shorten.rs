//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::dto::link::{LinkResponse, ShortenRequest};
use crate::api::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com", "title": "Example" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortUrl": "http://localhost:3000/aB3xK9_q",
///   "id": "aB3xK9_q",
///   "originalUrl": "https://example.com",
///   "title": "Example",
///   "clicks": 0,
///   "createdAt": "2025-01-01T12:00:00Z",
///   "ownerId": 1
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - `long_url` missing or empty
/// - `401 Unauthorized` - token missing, invalid or expired
/// - `500 Internal Server Error` - store failure or no free id
pub async fn shorten_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let Json(payload) = payload?;

    let link = state
        .link_service
        .shorten(&user, payload.long_url, payload.title)
        .await
        .map_err(|e| e.context("Failed to shorten URL"))?;

    let short_url = state.link_service.short_url(&link.id);

    Ok(Json(LinkResponse::new(link, short_url)))
}
