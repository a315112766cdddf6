//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short id and opaque token generation

pub mod code_generator;
