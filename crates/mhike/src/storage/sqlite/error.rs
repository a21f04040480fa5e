//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StoreError` from `mhike_core::storage`.
//! Failures that make the database file unusable map to `StorageUnavailable`
//! whatever the operation; everything else maps by operation kind.

use mhike_core::storage::StoreError;

/// Which kind of statement failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

/// Returns the unavailability reason if the error means the file cannot be used.
fn unavailable_reason(err: &rusqlite::Error) -> Option<String> {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen
                    | rusqlite::ErrorCode::NotADatabase
                    | rusqlite::ErrorCode::PermissionDenied
            ) =>
        {
            Some(format!("Cannot open database: {err}"))
        }
        _ => None,
    }
}

/// Maps a rusqlite error to a StoreError.
///
/// # Error Mapping
///
/// - `SQLITE_CANTOPEN`, `SQLITE_NOTADB`, `SQLITE_PERM` → `StoreError::StorageUnavailable`
/// - All other errors → `StoreError::ReadError` or `StoreError::WriteError` by operation
fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
    operation: Operation,
) -> StoreError {
    if let Some(reason) = unavailable_reason(err) {
        return StoreError::StorageUnavailable(reason);
    }

    match operation {
        Operation::Read => StoreError::read(entity_type, err.to_string()),
        Operation::Write => StoreError::write(entity_type, err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a StoreError.
///
/// This is the main entry point for error mapping in async code.
/// It extracts the inner `rusqlite::Error` if present. A closed connection
/// thread means the store is unusable.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    operation: Operation,
) -> StoreError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, operation)
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            StoreError::StorageUnavailable("Connection closed unexpectedly".to_string())
        }
        _ => match operation {
            Operation::Read => StoreError::read(entity_type, err.to_string()),
            Operation::Write => StoreError::write(entity_type, err.to_string()),
        },
    }
}

/// Maps any error raised while opening the file or creating the schema.
pub fn map_open_error(err: tokio_rusqlite::Error) -> StoreError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => StoreError::StorageUnavailable(
            unavailable_reason(rusqlite_err).unwrap_or_else(|| rusqlite_err.to_string()),
        ),
        _ => StoreError::StorageUnavailable(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn sqlite_failure(code: rusqlite::ErrorCode, extended_code: i32) -> tokio_rusqlite::Error {
        let sqlite_err = ffi::Error {
            code,
            extended_code,
        };
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None))
    }

    #[test]
    fn test_cannot_open_maps_to_storage_unavailable() {
        let err = sqlite_failure(rusqlite::ErrorCode::CannotOpen, ffi::SQLITE_CANTOPEN);

        let result = map_tokio_rusqlite_error(err, "HikeEntry", Operation::Read);

        assert!(matches!(result, StoreError::StorageUnavailable(_)));
    }

    #[test]
    fn test_not_a_database_maps_to_storage_unavailable() {
        let err = sqlite_failure(rusqlite::ErrorCode::NotADatabase, ffi::SQLITE_NOTADB);

        let result = map_tokio_rusqlite_error(err, "User", Operation::Write);

        assert!(result.is_unavailable());
    }

    #[test]
    fn test_constraint_violation_maps_to_write_error() {
        let err = sqlite_failure(
            rusqlite::ErrorCode::ConstraintViolation,
            ffi::SQLITE_CONSTRAINT_NOTNULL,
        );

        let result = map_tokio_rusqlite_error(err, "User", Operation::Write);

        assert!(matches!(
            result,
            StoreError::WriteError {
                entity_type: "User",
                ..
            }
        ));
    }

    #[test]
    fn test_busy_during_read_maps_to_read_error() {
        let err = sqlite_failure(rusqlite::ErrorCode::DatabaseBusy, ffi::SQLITE_BUSY);

        let result = map_tokio_rusqlite_error(err, "HikeEntry", Operation::Read);

        assert!(matches!(
            result,
            StoreError::ReadError {
                entity_type: "HikeEntry",
                ..
            }
        ));
    }

    #[test]
    fn test_connection_closed_maps_to_storage_unavailable() {
        let result = map_tokio_rusqlite_error(
            tokio_rusqlite::Error::ConnectionClosed,
            "HikeEntry",
            Operation::Write,
        );

        assert_eq!(
            result,
            StoreError::StorageUnavailable("Connection closed unexpectedly".to_string())
        );
    }

    #[test]
    fn test_other_error_maps_by_operation() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        let result = map_tokio_rusqlite_error(err, "User", Operation::Read);

        assert!(matches!(result, StoreError::ReadError { .. }));
    }

    #[test]
    fn test_open_error_is_always_unavailable() {
        let err = sqlite_failure(rusqlite::ErrorCode::DiskFull, ffi::SQLITE_FULL);

        assert!(map_open_error(err).is_unavailable());
    }
}
