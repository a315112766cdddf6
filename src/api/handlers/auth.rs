//! Handlers for registration and token renewal.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{RegisterRequest, RegisterResponse, RenewResponse};
use crate::api::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user and returns their first token.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Request Body
///
/// ```json
/// { "name": "Alice", "email": "alice@example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "User registered",
///   "token": "k3XqT9...",
///   "expiresAt": "2025-01-08T12:00:00Z"
/// }
/// ```
///
/// The raw token is returned only here and on renewal.
///
/// # Errors
///
/// - `400 Bad Request` - missing name or malformed email
/// - `500 Internal Server Error` - store failure
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request(
            "Name must not be empty",
            json!({ "field": "name" }),
        ));
    }

    let issued = state
        .token_service
        .register(name.to_string(), payload.email)
        .await
        .map_err(|e| e.context("Failed to register user"))?;

    Ok(Json(issued.into()))
}

/// Rotates the caller's token.
///
/// # Endpoint
///
/// `POST /renew-token`
///
/// The old token stops working immediately. Links stay with the caller.
///
/// # Response
///
/// ```json
/// {
///   "message": "Token renewed",
///   "newToken": "Zp8Rm2...",
///   "expiresAt": "2025-01-15T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized` - token missing, invalid, expired or already rotated
/// - `500 Internal Server Error` - store failure
pub async fn renew_token_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<RenewResponse>, AppError> {
    let issued = state
        .token_service
        .renew(&user)
        .await
        .map_err(|e| e.context("Failed to renew token"))?;

    Ok(Json(issued.into()))
}
