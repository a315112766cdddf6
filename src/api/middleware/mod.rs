//! HTTP middleware for request processing.
//!
//! Provides token authentication and observability middleware.

pub mod auth;
pub mod tracing;

pub use auth::AuthenticatedUser;
