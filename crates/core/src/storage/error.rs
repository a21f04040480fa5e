use thiserror::Error;

/// Errors that can occur during store operations.
///
/// "No matching row" is never an error: reads return `Ok(None)` and updates
/// return `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Failed to write {entity_type}: {message}")]
    WriteError {
        entity_type: &'static str,
        message: String,
    },
    #[error("Failed to read {entity_type}: {message}")]
    ReadError {
        entity_type: &'static str,
        message: String,
    },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Creates a write error for the given entity type.
    pub fn write(entity_type: &'static str, message: impl Into<String>) -> Self {
        StoreError::WriteError {
            entity_type,
            message: message.into(),
        }
    }

    /// Creates a read error for the given entity type.
    pub fn read(entity_type: &'static str, message: impl Into<String>) -> Self {
        StoreError::ReadError {
            entity_type,
            message: message.into(),
        }
    }

    /// Returns true if the store cannot be used until it is reopened.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::StorageUnavailable(_))
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_unavailable_display() {
        let error = StoreError::StorageUnavailable("unable to open database file".to_string());
        assert_eq!(
            error.to_string(),
            "Storage unavailable: unable to open database file"
        );
        assert!(error.is_unavailable());
    }

    #[test]
    fn test_write_error_display() {
        let error = StoreError::write("HikeEntry", "disk I/O error");
        assert_eq!(error.to_string(), "Failed to write HikeEntry: disk I/O error");
        assert!(!error.is_unavailable());
    }

    #[test]
    fn test_read_error_display() {
        let error = StoreError::read("User", "database is locked");
        assert_eq!(error.to_string(), "Failed to read User: database is locked");
    }

    #[test]
    fn test_invalid_data_display() {
        let error = StoreError::InvalidData("username must not be empty".to_string());
        assert_eq!(error.to_string(), "Invalid data: username must not be empty");
    }
}
