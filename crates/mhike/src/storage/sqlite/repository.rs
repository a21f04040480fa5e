//! SQLite repository implementation.
//!
//! Implements the repository traits from `mhike_core::storage` using SQLite.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use mhike_core::hike::{HikeEntry, NewHikeEntry, User};
use mhike_core::storage::{
    validate_credentials, validate_difficulty, validate_length, validate_password,
    EntryRepository, Result, StoreError, UserRepository,
};

use super::conversions::{row_to_entry, row_to_user, EntryParams};
use super::error::{map_open_error, map_tokio_rusqlite_error, Operation};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Owns one connection. Statements run on the connection's background thread
/// in submission order.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens a file-based database, creating the file if it doesn't exist.
    ///
    /// Schema tables are created automatically.
    pub async fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).await.map_err(map_open_error)?;

        conn.call(move |conn| conn.busy_timeout(busy_timeout).map_err(wrap_err))
            .await
            .map_err(map_open_error)?;

        Self::init_schema(&conn).await?;

        tracing::info!(path = %path.display(), "Opened hike database");
        Ok(Self { conn })
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing - data is lost when the repository is dropped.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(map_open_error)?;

        Self::init_schema(&conn).await?;

        tracing::debug!("Opened in-memory hike database");
        Ok(Self { conn })
    }

    /// Initialize the database schema. Safe to run against an existing file.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_open_error)
    }
}

/// Logs a failed statement before handing the error back to the caller.
fn log_failure(operation: &'static str, err: StoreError) -> StoreError {
    tracing::error!(operation, error = %err, "Store operation failed");
    err
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<i64> {
        validate_credentials(username, email, password)?;

        let username = username.to_string();
        let email = email.to_string();
        let password = password.to_string();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(schema::INSERT_USER, rusqlite::params![username, email, password])
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", Operation::Write))
            .map_err(|e| log_failure("create_user", e))?;

        tracing::info!(user_id = id, "User inserted");
        Ok(id)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_USERS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_user).map_err(wrap_err)?;

                let mut users = Vec::new();
                for row_result in rows {
                    users.push(row_result.map_err(wrap_err)?);
                }
                Ok(users)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", Operation::Read))
            .map_err(|e| log_failure("list_users", e))?;

        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    async fn find_user_by_credentials(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>> {
        let username = username.to_string();
        let email = email.to_string();
        let password = password.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_CREDENTIALS)
                    .map_err(wrap_err)?;
                match stmt.query_row([&username, &email, &password], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", Operation::Read))
            .map_err(|e| log_failure("find_user_by_credentials", e))
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", Operation::Read))
            .map_err(|e| log_failure("get_user_by_id", e))
    }

    async fn update_user(&self, user: &User) -> Result<bool> {
        validate_credentials(&user.username, &user.email, &user.password)?;

        let id = user.id;
        let username = user.username.clone();
        let email = user.email.clone();
        let password = user.password.clone();

        let rows = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::UPDATE_USER,
                    rusqlite::params![id, username, email, password],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", Operation::Write))
            .map_err(|e| log_failure("update_user", e))?;

        if rows == 0 {
            tracing::warn!(user_id = id, "No user to update");
            return Ok(false);
        }
        tracing::info!(user_id = id, "User updated");
        Ok(true)
    }

    async fn update_password(
        &self,
        username: &str,
        email: &str,
        new_password: &str,
    ) -> Result<bool> {
        validate_password(new_password)?;

        let username = username.to_string();
        let email = email.to_string();
        let new_password = new_password.to_string();

        let rows = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::UPDATE_PASSWORD,
                    rusqlite::params![username, email, new_password],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", Operation::Write))
            .map_err(|e| log_failure("update_password", e))?;

        if rows == 0 {
            tracing::warn!("No user matched password reset");
            return Ok(false);
        }
        tracing::info!(rows, "Password updated");
        Ok(true)
    }
}

// ============================================================================
// EntryRepository implementation
// ============================================================================

#[async_trait]
impl EntryRepository for SqliteRepository {
    async fn create_entry(&self, entry: &NewHikeEntry) -> Result<i64> {
        validate_length(entry.length)?;
        validate_difficulty(&entry.difficulty)?;
        let p = EntryParams::from_new(entry);

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_ENTRY,
                    rusqlite::params![
                        p.name,
                        p.location,
                        p.length,
                        p.date_of_hike,
                        p.parking_available,
                        p.hours,
                        p.minutes,
                        p.hikers,
                        p.difficulty,
                        p.description,
                        p.animal_sightings,
                        p.vegetation,
                        p.weather,
                        p.trail,
                        p.time_of_observation,
                        p.additional_comments
                    ],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "HikeEntry", Operation::Write))
            .map_err(|e| log_failure("create_entry", e))?;

        tracing::info!(entry_id = id, "Entry inserted");
        Ok(id)
    }

    async fn list_entries(&self) -> Result<Vec<HikeEntry>> {
        let entries = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_ENTRIES).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_entry).map_err(wrap_err)?;

                let mut entries = Vec::new();
                for row_result in rows {
                    entries.push(row_result.map_err(wrap_err)?);
                }
                Ok(entries)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "HikeEntry", Operation::Read))
            .map_err(|e| log_failure("list_entries", e))?;

        tracing::debug!(count = entries.len(), "Listed entries");
        Ok(entries)
    }

    async fn get_entry_by_id(&self, id: i64) -> Result<Option<HikeEntry>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_ENTRY_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_entry) {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "HikeEntry", Operation::Read))
            .map_err(|e| log_failure("get_entry_by_id", e))
    }

    async fn update_entry(&self, entry: &HikeEntry) -> Result<bool> {
        validate_length(entry.length)?;
        validate_difficulty(&entry.difficulty)?;
        let id = entry.id;
        let p = EntryParams::from_entry(entry);

        let rows = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::UPDATE_ENTRY,
                    rusqlite::params![
                        id,
                        p.name,
                        p.location,
                        p.length,
                        p.date_of_hike,
                        p.parking_available,
                        p.hours,
                        p.minutes,
                        p.hikers,
                        p.difficulty,
                        p.description,
                        p.animal_sightings,
                        p.vegetation,
                        p.weather,
                        p.trail,
                        p.time_of_observation,
                        p.additional_comments
                    ],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "HikeEntry", Operation::Write))
            .map_err(|e| log_failure("update_entry", e))?;

        if rows == 0 {
            tracing::warn!(entry_id = id, "No entry to update");
            return Ok(false);
        }
        tracing::info!(entry_id = id, "Entry updated");
        Ok(true)
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .call(move |conn| {
                conn.execute(schema::DELETE_ENTRY, [id])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "HikeEntry", Operation::Write))
            .map_err(|e| log_failure("delete_entry", e))?;

        tracing::info!(entry_id = id, deleted = rows, "Entry deleted");
        Ok(())
    }
}
