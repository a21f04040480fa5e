use thiserror::Error;

/// Errors that can occur when turning entry form input into a typed record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryFormError {
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Invalid date of hike: {0:?}")]
    InvalidDate(String),
}
