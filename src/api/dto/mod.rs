//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Response
//! bodies use camelCase field names; request bodies keep the snake_case
//! `long_url` field clients already send.

pub mod auth;
pub mod health;
pub mod link;
pub mod stats;
