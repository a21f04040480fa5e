//! Input checks shared by every storage backend.
//!
//! These run before any statement is issued, so a rejected input never
//! reaches the database.

use crate::hike::Difficulty;

use super::{Result, StoreError};

/// Validates the three fields of a new account.
pub fn validate_credentials(username: &str, email: &str, password: &str) -> Result<()> {
    require_non_empty("username", username)?;
    require_non_empty("email", email)?;
    validate_password(password)
}

/// Validates a password before it is stored.
pub fn validate_password(password: &str) -> Result<()> {
    require_non_empty("password", password)
}

/// Validates a trail length before it is stored.
///
/// SQLite stores NaN as NULL, so non-finite values would not round-trip.
pub fn validate_length(length: f64) -> Result<()> {
    if !length.is_finite() {
        return Err(StoreError::InvalidData(format!(
            "length must be a finite number, got {length}"
        )));
    }
    Ok(())
}

/// Validates a difficulty before it is stored.
///
/// The column is read back through [`Difficulty::parse`], so an `Other` value
/// that spells a known difficulty would come back as that variant instead.
pub fn validate_difficulty(difficulty: &Difficulty) -> Result<()> {
    if let Difficulty::Other(value) = difficulty {
        let parsed = Difficulty::parse(value);
        if !matches!(parsed, Difficulty::Other(_)) {
            return Err(StoreError::InvalidData(format!(
                "difficulty {value:?} must be stored as {parsed}"
            )));
        }
    }
    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(StoreError::InvalidData(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        assert!(validate_credentials("alice", "alice@example.com", "secret1").is_ok());
    }

    #[test]
    fn test_empty_username_is_rejected() {
        assert_eq!(
            validate_credentials("", "alice@example.com", "secret1"),
            Err(StoreError::InvalidData("username must not be empty".to_string()))
        );
    }

    #[test]
    fn test_empty_email_is_rejected() {
        assert_eq!(
            validate_credentials("alice", "", "secret1"),
            Err(StoreError::InvalidData("email must not be empty".to_string()))
        );
    }

    #[test]
    fn test_empty_password_is_rejected() {
        assert!(matches!(
            validate_password(""),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_length_must_be_finite() {
        assert!(validate_length(0.0).is_ok());
        assert!(validate_length(4068.0).is_ok());
        assert!(validate_length(f64::NAN).is_err());
        assert!(validate_length(f64::INFINITY).is_err());
    }

    #[test]
    fn test_difficulty_other_must_not_shadow_known_value() {
        assert!(validate_difficulty(&Difficulty::Hard).is_ok());
        assert!(validate_difficulty(&Difficulty::Other("Scramble".to_string())).is_ok());
        assert_eq!(
            validate_difficulty(&Difficulty::Other("hard".to_string())),
            Err(StoreError::InvalidData(
                r#"difficulty "hard" must be stored as Hard"#.to_string()
            ))
        );
        assert!(validate_difficulty(&Difficulty::Other(" Easy ".to_string())).is_err());
    }
}
