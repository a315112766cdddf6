//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with `sqlx::query_as` and mapped through
//! `FromRow` row types, so the crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User storage and token rotation
//! - [`PgLinkRepository`] - Link storage, lookup and click counting

pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
