//! Owner-scoped API routes.
//!
//! Every endpoint here requires a valid token via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    delete_link_handler, edit_link_handler, links_handler, renew_token_handler, shorten_handler,
    stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// All token-protected routes.
///
/// # Endpoints
///
/// - `POST   /renew-token`   - Rotate the caller's token
/// - `POST   /shorten`       - Create a short link
/// - `GET    /links`         - List the caller's links
/// - `PATCH  /edit/{id}`     - Change URL or title of an owned link
/// - `DELETE /delete/{id}`   - Delete an owned link
/// - `GET    /stats/{id}`    - Click statistics of an owned link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/renew-token", post(renew_token_handler))
        .route("/shorten", post(shorten_handler))
        .route("/links", get(links_handler))
        .route("/edit/{id}", patch(edit_link_handler))
        .route("/delete/{id}", delete(delete_link_handler))
        .route("/stats/{id}", get(stats_handler))
}
