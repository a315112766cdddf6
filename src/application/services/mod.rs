//! Business logic services for the application layer.

pub mod link_service;
pub mod token_service;

pub use link_service::{LinkService, LinkStats};
pub use token_service::{IssuedToken, TokenService};
