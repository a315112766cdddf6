//! Repository trait definitions for the domain layer.
//!
//! These traits are the record-store contract the services depend on:
//! query-by-field and patch-by-id over two collections, users and links.
//!
//! # Implementations
//!
//! - `crate::infrastructure::persistence` - PostgreSQL
//! - `crate::infrastructure::memory` - in-process maps
//! - Mock implementations are generated via `mockall` for unit tests
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User registration and token rotation
//! - [`LinkRepository`] - Short link CRUD and click counting

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
