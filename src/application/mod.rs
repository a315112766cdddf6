//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::token_service::TokenService`] - Registration, token validation and renewal
//! - [`services::link_service::LinkService`] - Short links, redirects and ownership checks

pub mod services;
