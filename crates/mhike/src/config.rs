use std::{env, path::PathBuf, time::Duration};

/// Store configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to SQLite database file (default: "m-hike.db")
    pub db_path: PathBuf,
    /// SQLite busy timeout in milliseconds (default: 5,000)
    pub busy_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MHIKE_DB_PATH` - SQLite database path (default: "m-hike.db")
    /// - `MHIKE_BUSY_TIMEOUT_MS` - Busy timeout in milliseconds (default: 5,000)
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("MHIKE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("m-hike.db")),
            busy_timeout_ms: env::var("MHIKE_BUSY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
        }
    }

    /// Creates a configuration for the given database file with the default timeout.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: 5_000,
        }
    }

    /// Get busy timeout as a Duration.
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
