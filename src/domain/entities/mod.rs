//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! structs (`NewUser`, `NewLink`) and partial updates in `LinkPatch`.
//!
//! # Entity Types
//!
//! - [`User`] - A registered API client holding one active token
//! - [`Link`] - A shortened URL owned by a user

pub mod link;
pub mod user;

pub use link::{Link, LinkPatch, NewLink};
pub use user::{NewUser, User};
