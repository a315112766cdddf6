//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// Public. The click is counted by the store in the same round trip as the
/// lookup, so concurrent visits are never lost.
///
/// # Errors
///
/// - `404 Not Found` - no link with this id
/// - `500 Internal Server Error` - store failure
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state
        .link_service
        .resolve(&id)
        .await
        .map_err(|e| e.context("Failed to resolve link"))?;

    Ok(Redirect::temporary(&original_url))
}
