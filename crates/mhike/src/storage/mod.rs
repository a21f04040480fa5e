//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `mhike_core::storage`:
//!
//! - [`SqliteRepository`]: the persistent backend, one SQLite file per store.
//! - [`InMemoryRepository`]: same semantics without a file, for tests and previews.

pub mod inmemory;
pub mod sqlite;

pub use inmemory::InMemoryRepository;
pub use sqlite::SqliteRepository;
