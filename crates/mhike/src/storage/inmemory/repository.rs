//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mhike_core::hike::{HikeEntry, NewHikeEntry, User};
use mhike_core::storage::{
    validate_credentials, validate_difficulty, validate_length, validate_password,
    EntryRepository, Result, UserRepository,
};

/// Rows of one table plus the last ID handed out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory storage backend for testing.
///
/// Uses BTreeMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    users: Arc<RwLock<Table<User>>>,
    entries: Arc<RwLock<Table<HikeEntry>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(Table::new())),
            entries: Arc::new(RwLock::new(Table::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<i64> {
        validate_credentials(username, email, password)?;

        let mut users = self.users.write().await;
        let id = users.next_id();
        users.rows.insert(id, User::new(id, username, email, password));
        Ok(id)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.rows.values().cloned().collect())
    }

    async fn find_user_by_credentials(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .rows
            .values()
            .find(|u| u.matches_credentials(username, email, password))
            .cloned())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.get(&id).cloned())
    }

    async fn update_user(&self, user: &User) -> Result<bool> {
        validate_credentials(&user.username, &user.email, &user.password)?;

        let mut users = self.users.write().await;
        match users.rows.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(
        &self,
        username: &str,
        email: &str,
        new_password: &str,
    ) -> Result<bool> {
        validate_password(new_password)?;

        let mut users = self.users.write().await;
        let mut updated = false;
        for user in users
            .rows
            .values_mut()
            .filter(|u| u.username == username && u.email == email)
        {
            user.password = new_password.to_string();
            updated = true;
        }
        Ok(updated)
    }
}

#[async_trait]
impl EntryRepository for InMemoryRepository {
    async fn create_entry(&self, entry: &NewHikeEntry) -> Result<i64> {
        validate_length(entry.length)?;
        validate_difficulty(&entry.difficulty)?;

        let mut entries = self.entries.write().await;
        let id = entries.next_id();
        entries
            .rows
            .insert(id, HikeEntry::from_new(id, entry.clone()));
        Ok(id)
    }

    async fn list_entries(&self) -> Result<Vec<HikeEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.rows.values().rev().cloned().collect())
    }

    async fn get_entry_by_id(&self, id: i64) -> Result<Option<HikeEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.rows.get(&id).cloned())
    }

    async fn update_entry(&self, entry: &HikeEntry) -> Result<bool> {
        validate_length(entry.length)?;
        validate_difficulty(&entry.difficulty)?;

        let mut entries = self.entries.write().await;
        match entries.rows.get_mut(&entry.id) {
            Some(existing) => {
                *existing = entry.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.rows.remove(&id);
        Ok(())
    }
}
