//! In-process repository implementations backed by `DashMap`.
//!
//! Used for single-instance deployments (`STORE_BACKEND=memory`), local
//! development and HTTP-level tests. Data lives only as long as the process.
//!
//! Per-record mutations run under the map's entry lock, which makes click
//! increments and token replacement atomic within this process.

pub mod memory_link_repository;
pub mod memory_user_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use memory_user_repository::MemoryUserRepository;
