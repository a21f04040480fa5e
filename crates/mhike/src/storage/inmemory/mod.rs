//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the repository traits
//! that stores all data in ordered maps wrapped in `Arc<RwLock<_>>`. IDs are
//! assigned the way SQLite's `AUTOINCREMENT` does, so they are never reused.
//!
//! # Example
//!
//! ```rust,ignore
//! use mhike::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
