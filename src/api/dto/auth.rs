//! DTOs for registration and token renewal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::IssuedToken;

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name must not be empty"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for RegisterResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            message: "User registered".to_string(),
            expires_at: issued.expires_at(),
            token: issued.token,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewResponse {
    pub message: String,
    pub new_token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for RenewResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            message: "Token renewed".to_string(),
            expires_at: issued.expires_at(),
            new_token: issued.token,
        }
    }
}
