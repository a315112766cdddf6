//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, TokenService};
use crate::config::Config;
use crate::domain::repositories::{LinkRepository, UserRepository};

/// Token service over whichever user store is configured.
pub type DynTokenService = TokenService<dyn UserRepository>;

/// Link service over whichever link store is configured.
pub type DynLinkService = LinkService<dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<DynTokenService>,
    pub link_service: Arc<DynLinkService>,
}

impl AppState {
    /// Wires both services on top of the given repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        config: &Config,
    ) -> Self {
        Self::with_settings(
            users,
            links,
            config.token_signing_secret.clone(),
            config.token_validity_days,
            config.public_base_url.clone(),
        )
    }

    /// Same as [`AppState::new`] with explicit settings instead of a [`Config`].
    pub fn with_settings(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        token_signing_secret: String,
        token_validity_days: u32,
        public_base_url: String,
    ) -> Self {
        Self {
            token_service: Arc::new(TokenService::new(
                users,
                token_signing_secret,
                token_validity_days,
            )),
            link_service: Arc::new(LinkService::new(links, public_base_url)),
        }
    }
}
