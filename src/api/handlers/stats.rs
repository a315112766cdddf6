//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::api::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click statistics for an owned link.
///
/// # Endpoint
///
/// `GET /stats/{id}`
///
/// # Response
///
/// ```json
/// {
///   "id": "aB3xK9_q",
///   "title": "Example",
///   "clicks": 3,
///   "createdAt": "2025-01-01T12:00:00Z",
///   "shortUrl": "http://localhost:3000/aB3xK9_q",
///   "originalUrl": "https://example.com"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized` - token missing, invalid or expired
/// - `403 Forbidden` - link absent or owned by someone else
/// - `500 Internal Server Error` - store failure
pub async fn stats_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state
        .link_service
        .stats(&id, &user)
        .await
        .map_err(|e| e.context("Failed to get link stats"))?;

    Ok(Json(stats.into()))
}
