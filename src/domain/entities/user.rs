//! User entity representing a registered API client.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// `id` is the stable identity that links are attached to. The credential is
/// the rotating token, of which only an HMAC digest (`token_hash`) is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl User {
    /// Returns true once `now` has moved past the token expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Input data for registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
