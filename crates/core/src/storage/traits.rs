use async_trait::async_trait;

use crate::hike::{HikeEntry, NewHikeEntry, User};

use super::Result;

/// Repository for user account operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user and returns its ID.
    async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<i64>;

    /// Lists all users in insertion order.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Finds a user whose username, email and password all match.
    async fn find_user_by_credentials(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>>;

    /// Gets a user by their ID.
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Replaces every field of the user with `user.id`.
    /// Returns false if no such user exists.
    async fn update_user(&self, user: &User) -> Result<bool>;

    /// Sets the password of every user matching username and email.
    /// Returns false if no user matched.
    async fn update_password(&self, username: &str, email: &str, new_password: &str)
        -> Result<bool>;
}

/// Repository for hike entry operations.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Creates a new entry and returns its ID.
    async fn create_entry(&self, entry: &NewHikeEntry) -> Result<i64>;

    /// Lists all entries, newest first.
    async fn list_entries(&self) -> Result<Vec<HikeEntry>>;

    /// Gets an entry by its ID.
    async fn get_entry_by_id(&self, id: i64) -> Result<Option<HikeEntry>>;

    /// Replaces every field of the entry with `entry.id`.
    /// Returns false if no such entry exists.
    async fn update_entry(&self, entry: &HikeEntry) -> Result<bool>;

    /// Deletes an entry by its ID. Deleting a missing entry is a no-op.
    async fn delete_entry(&self, id: i64) -> Result<()>;
}
