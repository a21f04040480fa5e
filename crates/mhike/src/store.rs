//! The application-facing store handle.
//!
//! [`LocalStore`] owns the database connection for its whole lifetime. The
//! connection is opened on first use, and the schema is created before any
//! statement runs.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use mhike_core::hike::{HikeEntry, NewHikeEntry, User};
use mhike_core::storage::{EntryRepository, Result, UserRepository};

use crate::config::Config;
use crate::storage::SqliteRepository;

/// Lazily-initialized SQLite store.
///
/// Create one at startup and pass it by reference. Concurrent first calls
/// share a single open; a failed open leaves the store uninitialized so the
/// next call tries again.
pub struct LocalStore {
    config: Config,
    repo: OnceCell<SqliteRepository>,
}

impl LocalStore {
    /// Creates an uninitialized store. No file is touched until first use.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            repo: OnceCell::new(),
        }
    }

    /// Creates a store configured from the environment.
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    /// Returns the configuration this store opens with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true once the connection has been opened.
    pub fn is_initialized(&self) -> bool {
        self.repo.initialized()
    }

    /// Opens the database and creates the schema if that hasn't happened yet.
    pub async fn initialize(&self) -> Result<&SqliteRepository> {
        self.repo
            .get_or_try_init(|| async {
                tracing::info!(path = %self.config.db_path.display(), "Initializing local store");
                SqliteRepository::open(&self.config.db_path, self.config.busy_timeout())
                    .await
                    .inspect_err(|e| tracing::error!(error = %e, "Local store initialization failed"))
            })
            .await
    }
}

#[async_trait]
impl UserRepository for LocalStore {
    async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<i64> {
        self.initialize()
            .await?
            .create_user(username, email, password)
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.initialize().await?.list_users().await
    }

    async fn find_user_by_credentials(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.initialize()
            .await?
            .find_user_by_credentials(username, email, password)
            .await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.initialize().await?.get_user_by_id(id).await
    }

    async fn update_user(&self, user: &User) -> Result<bool> {
        self.initialize().await?.update_user(user).await
    }

    async fn update_password(
        &self,
        username: &str,
        email: &str,
        new_password: &str,
    ) -> Result<bool> {
        self.initialize()
            .await?
            .update_password(username, email, new_password)
            .await
    }
}

#[async_trait]
impl EntryRepository for LocalStore {
    async fn create_entry(&self, entry: &NewHikeEntry) -> Result<i64> {
        self.initialize().await?.create_entry(entry).await
    }

    async fn list_entries(&self) -> Result<Vec<HikeEntry>> {
        self.initialize().await?.list_entries().await
    }

    async fn get_entry_by_id(&self, id: i64) -> Result<Option<HikeEntry>> {
        self.initialize().await?.get_entry_by_id(id).await
    }

    async fn update_entry(&self, entry: &HikeEntry) -> Result<bool> {
        self.initialize().await?.update_entry(entry).await
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        self.initialize().await?.delete_entry(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mhike_core::hike::Difficulty;
    use mhike_core::storage::StoreError;

    fn store_in(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(Config::with_db_path(dir.path().join("m-hike.db")))
    }

    #[tokio::test]
    async fn test_store_is_lazy() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.is_initialized());
        assert!(!dir.path().join("m-hike.db").exists());

        store.list_entries().await.unwrap();

        assert!(store.is_initialized());
        assert!(dir.path().join("m-hike.db").exists());
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_initialize_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let (a, b, c) = tokio::join!(store.initialize(), store.initialize(), store.initialize());
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());

        assert!(std::ptr::eq(a, b));
        assert!(std::ptr::eq(b, c));
    }

    #[tokio::test]
    async fn test_concurrent_first_writes_share_connection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let (first, second) = tokio::join!(
            store.create_user("alice", "alice@example.com", "pw"),
            store.create_user("bob", "bob@example.com", "pw"),
        );

        let mut ids = vec![first.unwrap(), second.unwrap()];
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_initialization_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        let store = LocalStore::new(Config::with_db_path(nested.join("m-hike.db")));

        let first = store.list_users().await;
        assert!(matches!(first, Err(StoreError::StorageUnavailable(_))));
        assert!(!store.is_initialized());

        std::fs::create_dir(&nested).unwrap();

        assert!(store.list_users().await.unwrap().is_empty());
        assert!(store.is_initialized());
    }

    #[tokio::test]
    async fn test_full_hike_flow() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let user_id = store
            .create_user("hiker", "hiker@example.com", "pw")
            .await
            .unwrap();
        let user = store
            .find_user_by_credentials("hiker", "hiker@example.com", "pw")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, user_id);

        let entry = NewHikeEntry::new(
            "Mount Everest",
            "Pakistan",
            4068.0,
            Utc.with_ymd_and_hms(2025, 10, 31, 0, 0, 0).unwrap(),
        )
        .with_parking(true)
        .with_duration(5, 30)
        .with_hikers(4)
        .with_difficulty(Difficulty::Hard);

        let id = store.create_entry(&entry).await.unwrap();
        let mut saved = store.get_entry_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved, HikeEntry::from_new(id, entry));

        saved.weather = Some("Blizzard".to_string());
        assert!(store.update_entry(&saved).await.unwrap());
        assert_eq!(store.list_entries().await.unwrap(), vec![saved]);

        store.delete_entry(id).await.unwrap();
        assert!(store.list_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = store_in(&dir);
            store
                .create_user("alice", "alice@example.com", "pw")
                .await
                .unwrap();
        }

        let store = store_in(&dir);
        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
    }

    #[tokio::test]
    async fn test_delete_missing_entry_opens_store_and_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.delete_entry(404).await.unwrap();

        assert!(store.is_initialized());
    }

    #[tokio::test]
    async fn test_update_password_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store
            .update_password("erin", "erin@example.com", "new")
            .await
            .unwrap());

        store
            .create_user("erin", "erin@example.com", "old")
            .await
            .unwrap();
        assert!(store
            .update_password("erin", "erin@example.com", "new")
            .await
            .unwrap());
        assert!(store
            .find_user_by_credentials("erin", "erin@example.com", "new")
            .await
            .unwrap()
            .is_some());
    }
}
