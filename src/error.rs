//! Application error type and its HTTP representation.
//!
//! Every failure leaves the service as a JSON object with a human-readable
//! `error` message and a stable machine-readable `code`:
//!
//! ```json
//! { "error": "Token expired", "code": "expired_token" }
//! ```
//!
//! Store failures keep their underlying cause in [`std::error::Error::source`]
//! so it can be logged, but only a fixed message reaches the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("Token not provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    /// The link is absent or owned by another user. Both cases share one
    /// response so owner-scoped endpoints do not reveal which ids exist.
    #[error("Access to link denied")]
    Forbidden,

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Wraps a persistence failure (query error, timeout, unreachable store).
    pub fn store(source: impl Into<BoxError>) -> Self {
        Self::Store {
            message: "Storage error".to_string(),
            source: source.into(),
        }
    }

    /// Replaces the public message of a server-side failure with a fixed,
    /// endpoint-specific one. Client errors pass through untouched.
    pub fn context(self, message: &str) -> Self {
        match self {
            Self::Store { source, .. } => Self::Store {
                message: message.to_string(),
                source,
            },
            Self::Internal { details, .. } => Self::Internal {
                message: message.to_string(),
                details,
            },
            Self::Conflict { .. } => Self::Internal {
                message: message.to_string(),
                details: Value::Null,
            },
            other => other,
        }
    }

    /// Stable machine-readable error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
            Self::Forbidden => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Store { .. } => "store_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::MissingToken | Self::InvalidToken | Self::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Store { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true for the authentication failures handled by the request gate.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::MissingToken | Self::InvalidToken | Self::ExpiredToken
        )
    }

    fn body(&self) -> ErrorBody {
        let details = match self {
            Self::Validation { details, .. } => details.clone(),
            _ => Value::Null,
        };

        ErrorBody {
            error: self.to_string(),
            code: self.code(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Store { message, source } => {
                tracing::error!(error = %message, cause = %source, "Store operation failed");
            }
            Self::Internal { message, details } => {
                tracing::error!(error = %message, details = %details, "Internal error");
            }
            _ => {}
        }

        let body = Json(self.body());

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        AppError::store(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("Invalid JSON body", json!({ "reason": e.body_text() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid request body", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::ExpiredToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::not_found("Link not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::store(std::io::Error::other("down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_errors_classified() {
        assert!(AppError::MissingToken.is_auth_error());
        assert!(AppError::ExpiredToken.is_auth_error());
        assert!(!AppError::Forbidden.is_auth_error());
        assert!(!AppError::store(std::io::Error::other("down")).is_auth_error());
    }

    #[test]
    fn test_context_replaces_store_message_and_keeps_source() {
        let err = AppError::store(std::io::Error::other("connection refused"))
            .context("Failed to register user");

        assert_eq!(err.to_string(), "Failed to register user");
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
    }

    #[test]
    fn test_context_leaves_client_errors_alone() {
        let err = AppError::Forbidden.context("Failed to edit link");
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_context_turns_conflict_into_internal() {
        let err = AppError::conflict("duplicate").context("Failed to save link");
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unauthorized_response_shape() {
        let response = AppError::ExpiredToken.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let body = body_json(response).await;
        assert_eq!(body["error"], "Token expired");
        assert_eq!(body["code"], "expired_token");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_store_error_hides_cause() {
        let response = AppError::store(std::io::Error::other("password=hunter2"))
            .context("Failed to list links")
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to list links");
        assert_eq!(body["code"], "store_error");
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_validation_error_includes_details() {
        let response =
            AppError::bad_request("Invalid request body", json!({ "field": "email" }))
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "validation_error");
        assert_eq!(body["details"]["field"], "email");
    }
}
