//! Token lifecycle service: registration, validation and renewal.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_token;

type HmacSha256 = Hmac<Sha256>;

/// A freshly issued raw token together with the user record it belongs to.
///
/// The raw token is only ever available here; the store keeps its digest.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub user: User,
    pub token: String,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.user.expires_at
    }
}

/// Service owning the user lifecycle and the opaque bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the store cannot verify
/// or forge tokens without the server-side secret.
pub struct TokenService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
    validity: Duration,
}

impl<R: UserRepository + ?Sized> TokenService<R> {
    /// Creates a new token service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user repository
    /// - `signing_secret` - HMAC key; must match the value used when tokens were issued
    /// - `validity_days` - lifetime of every issued token
    pub fn new(repository: Arc<R>, signing_secret: String, validity_days: u32) -> Self {
        Self {
            repository,
            signing_secret,
            validity: Duration::days(i64::from(validity_days)),
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Current time at the precision the stores keep (microseconds).
    fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    /// Registers a user and issues their first token.
    ///
    /// `expires_at - created_at` is exactly the configured validity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the user cannot be persisted.
    pub async fn register(&self, name: String, email: String) -> Result<IssuedToken, AppError> {
        let token = generate_token();
        let created_at = Self::now();

        let new_user = NewUser {
            name,
            email,
            token_hash: self.hash_token(&token),
            created_at,
            expires_at: created_at + self.validity,
        };

        let user = self.repository.create(new_user).await?;
        info!(user_id = user.id, expires_at = %user.expires_at, "User registered");

        Ok(IssuedToken { user, token })
    }

    /// Resolves a raw token to the user holding it.
    ///
    /// The token is hashed as given; callers strip transport whitespace.
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingToken`] if no token (or an empty one) was supplied
    /// - [`AppError::InvalidToken`] if no user holds the token
    /// - [`AppError::ExpiredToken`] if the token is past its expiry
    /// - [`AppError::Store`] on storage errors
    pub async fn validate(&self, token: Option<&str>) -> Result<User, AppError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AppError::MissingToken)?;

        let user = self
            .repository
            .find_by_token_hash(&self.hash_token(token))
            .await?
            .ok_or_else(|| {
                debug!("Rejected unknown token");
                AppError::InvalidToken
            })?;

        if user.is_expired_at(Utc::now()) {
            debug!(user_id = user.id, "Rejected expired token");
            return Err(AppError::ExpiredToken);
        }

        Ok(user)
    }

    /// Rotates the token of an already validated user.
    ///
    /// The new token always differs from the old one and its expiry is
    /// strictly later than the previous expiry. Links are keyed by user id and
    /// stay with the owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidToken`] if the token was rotated concurrently.
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn renew(&self, user: &User) -> Result<IssuedToken, AppError> {
        let (token, token_hash) = loop {
            let candidate = generate_token();
            let hash = self.hash_token(&candidate);
            if hash != user.token_hash {
                break (candidate, hash);
            }
        };

        let expires_at =
            (Self::now() + self.validity).max(user.expires_at + Duration::microseconds(1));

        let renewed = self
            .repository
            .replace_token(user.id, &user.token_hash, &token_hash, expires_at)
            .await?
            .ok_or(AppError::InvalidToken)?;

        info!(user_id = renewed.id, expires_at = %renewed.expires_at, "Token renewed");

        Ok(IssuedToken {
            user: renewed,
            token,
        })
    }

    /// Rotates the token of a user identified by id, regardless of expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn renew_by_id(&self, id: i64) -> Result<IssuedToken, AppError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        self.renew(&user).await
    }

    /// Lists all registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }
}
