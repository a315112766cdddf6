//! Link creation, resolution and owner-scoped management.

use axum::http::HeaderValue;
use chrono::{DateTime, SubsecRound, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, LinkPatch, NewLink, User};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved};

/// Click statistics for a single link, as shown to its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStats {
    pub id: String,
    pub title: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub short_url: String,
    pub original_url: String,
}

/// Service for creating, resolving and managing shortened links.
///
/// Every owner-scoped operation (edit, delete, stats) goes through the same
/// ownership check: a link that does not exist and a link owned by someone
/// else both yield [`AppError::Forbidden`].
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    public_base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `public_base_url` is the scheme and host short URLs are built on,
    /// e.g. `https://s.example.com`.
    pub fn new(link_repository: Arc<L>, public_base_url: String) -> Self {
        Self {
            link_repository,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link owned by `owner`.
    ///
    /// The URL is stored as given. An omitted title is stored as empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is blank or cannot be
    /// sent back as a `Location` header.
    /// Returns [`AppError::Internal`] if no free id was found.
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn shorten(
        &self,
        owner: &User,
        original_url: String,
        title: Option<String>,
    ) -> Result<Link, AppError> {
        check_destination(&original_url)?;

        const MAX_ATTEMPTS: usize = 10;

        let created_at = Utc::now().trunc_subsecs(6);
        let title = title.unwrap_or_default();

        for _ in 0..MAX_ATTEMPTS {
            let id = self.generate_free_code().await?;

            let new_link = NewLink {
                id,
                original_url: original_url.clone(),
                title: title.clone(),
                created_at,
                owner_id: owner.id,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    info!(link_id = %link.id, owner_id = owner.id, "Link created");
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!("Short id taken between check and insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique id",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves a short id to its destination and counts the click.
    ///
    /// The increment happens atomically in the store, in the same round trip
    /// as the lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn resolve(&self, id: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .increment_clicks(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        debug!(link_id = %link.id, clicks = link.clicks, "Link resolved");

        Ok(link.original_url)
    }

    /// Lists the links owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn list(&self, owner: &User) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_owner(owner.id).await
    }

    /// Updates destination and/or title of an owned link.
    ///
    /// Omitted or blank fields keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the link is absent or not owned by `owner`.
    /// Returns [`AppError::Validation`] if the new URL cannot be sent back as a
    /// `Location` header.
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn edit(&self, id: &str, owner: &User, patch: LinkPatch) -> Result<Link, AppError> {
        let link = self.find_owned(id, owner).await?;
        let (original_url, title) = patch.apply(&link);

        if original_url != link.original_url {
            check_destination(&original_url)?;
        }

        let updated = self
            .link_repository
            .update(id, &original_url, &title)
            .await?
            .ok_or(AppError::Forbidden)?;

        info!(link_id = %id, owner_id = owner.id, "Link updated");

        Ok(updated)
    }

    /// Permanently deletes an owned link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the link is absent or not owned by `owner`.
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn delete(&self, id: &str, owner: &User) -> Result<(), AppError> {
        self.find_owned(id, owner).await?;

        if !self.link_repository.delete(id).await? {
            return Err(AppError::Forbidden);
        }

        info!(link_id = %id, owner_id = owner.id, "Link deleted");

        Ok(())
    }

    /// Returns click statistics for an owned link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the link is absent or not owned by `owner`.
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn stats(&self, id: &str, owner: &User) -> Result<LinkStats, AppError> {
        let link = self.find_owned(id, owner).await?;

        Ok(LinkStats {
            short_url: self.short_url(&link.id),
            id: link.id,
            title: link.title,
            clicks: link.clicks,
            created_at: link.created_at,
            original_url: link.original_url,
        })
    }

    /// Counts all links and clicks in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn totals(&self) -> Result<(i64, i64), AppError> {
        self.link_repository.totals().await
    }

    /// Checks that the link store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store cannot be reached.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Builds the absolute short URL for an id.
    pub fn short_url(&self, id: &str) -> String {
        format!("{}/{}", self.public_base_url, id)
    }

    async fn find_owned(&self, id: &str, owner: &User) -> Result<Link, AppError> {
        match self.link_repository.find_by_id(id).await? {
            Some(link) if link.is_owned_by(owner.id) => Ok(link),
            _ => {
                debug!(link_id = %id, user_id = owner.id, "Ownership check failed");
                Err(AppError::Forbidden)
            }
        }
    }

    /// Generates an id that is neither reserved nor present in the store.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_free_code(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            if is_reserved(&code) {
                continue;
            }

            if self.link_repository.find_by_id(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique id",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

/// Rejects destinations the redirect could not emit.
fn check_destination(url: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::bad_request(
            "long_url must not be empty",
            json!({ "field": "long_url" }),
        ));
    }

    if HeaderValue::from_str(url).is_err() {
        return Err(AppError::bad_request(
            "long_url contains characters not allowed in a URL",
            json!({ "field": "long_url" }),
        ));
    }

    Ok(())
}
