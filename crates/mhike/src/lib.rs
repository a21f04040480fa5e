//! Local persistence for the M-Hike hiking journal.
//!
//! [`LocalStore`] is the handle the presentation layer holds. It opens one
//! SQLite file on first use and exposes the account and hike entry operations
//! through the [`UserRepository`] and [`EntryRepository`] traits from
//! `mhike_core`.
//!
//! ```rust,ignore
//! use mhike::{Config, LocalStore};
//! use mhike::prelude::*;
//!
//! let store = LocalStore::new(Config::from_env());
//! let id = store.create_user("alice", "alice@example.com", "secret").await?;
//! ```

pub mod config;
pub mod logging;
pub mod storage;
pub mod store;

pub use config::Config;
pub use store::LocalStore;

pub use mhike_core::storage::{EntryRepository, StoreError, UserRepository};

/// Traits needed to call store operations.
pub mod prelude {
    pub use mhike_core::storage::{EntryRepository, UserRepository};
}
