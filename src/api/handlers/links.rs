//! Handlers for listing, editing and deleting the caller's links.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::api::dto::link::{LinkResponse, MessageResponse, UpdateLinkRequest};
use crate::api::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every link owned by the caller.
///
/// # Endpoint
///
/// `GET /links`
///
/// Returns an array of link objects in the same shape as `POST /shorten`.
pub async fn links_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state
        .link_service
        .list(&user)
        .await
        .map_err(|e| e.context("Failed to list links"))?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.id);
            LinkResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Changes the destination and/or title of an owned link.
///
/// # Endpoint
///
/// `PATCH /edit/{id}`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.org", "title": "Renamed" }
/// ```
///
/// Both fields are optional; absent or empty values keep the stored ones.
///
/// # Errors
///
/// - `401 Unauthorized` - token missing, invalid or expired
/// - `403 Forbidden` - link absent or owned by someone else
/// - `500 Internal Server Error` - store failure
pub async fn edit_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<UpdateLinkRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;

    state
        .link_service
        .edit(&id, &user, payload.into())
        .await
        .map_err(|e| e.context("Failed to update link"))?;

    Ok(Json(MessageResponse::new("Link updated")))
}

/// Deletes an owned link. Its short URL stops resolving immediately.
///
/// # Endpoint
///
/// `DELETE /delete/{id}`
///
/// # Errors
///
/// - `401 Unauthorized` - token missing, invalid or expired
/// - `403 Forbidden` - link absent or owned by someone else
/// - `500 Internal Server Error` - store failure
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .link_service
        .delete(&id, &user)
        .await
        .map_err(|e| e.context("Failed to delete link"))?;

    Ok(Json(MessageResponse::new("Link deleted")))
}
