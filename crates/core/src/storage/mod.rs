mod error;
mod traits;
mod validation;

pub use error::{Result, StoreError};
pub use traits::{EntryRepository, UserRepository};
pub use validation::{
    validate_credentials, validate_difficulty, validate_length, validate_password,
};
