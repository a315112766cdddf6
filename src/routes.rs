//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{id}`         - Short link redirect (public)
//! - `GET  /health`       - Store health check (public)
//! - `POST /register`     - Issue a token to a new user (public)
//! - everything else      - Owner-scoped API, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - `x-api-key` or Bearer token on owner-scoped routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, register_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// All routes and per-route middleware, without path normalization.
pub fn router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/{id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/register", post(register_handler))
        .merge(api_router)
        .with_state(state)
        .layer(tracing::layer())
}
