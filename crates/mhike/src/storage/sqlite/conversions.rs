//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! The store owns the boolean encoding: `parkingAvailable` is written as 0/1
//! and read back as `bool`, so callers never see the raw integer.

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, ValueRef};
use rusqlite::Row;

use mhike_core::hike::{format_hike_date, Difficulty, HikeEntry, NewHikeEntry, User};

// ============================================================================
// User conversions
// ============================================================================

/// Convert a SQLite row to a User.
///
/// Expected columns: id, username, email, password
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
    })
}

// ============================================================================
// Entry conversions
// ============================================================================

/// Column values for an entry write, in `INSERT_ENTRY` parameter order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryParams {
    pub name: String,
    pub location: String,
    pub length: f64,
    pub date_of_hike: String,
    pub parking_available: i64,
    pub hours: u32,
    pub minutes: u32,
    pub hikers: u32,
    pub difficulty: String,
    pub description: Option<String>,
    pub animal_sightings: Option<String>,
    pub vegetation: Option<String>,
    pub weather: Option<String>,
    pub trail: Option<String>,
    pub time_of_observation: Option<String>,
    pub additional_comments: Option<String>,
}

impl EntryParams {
    /// Builds owned column values so they can move into a connection closure.
    pub fn from_new(entry: &NewHikeEntry) -> Self {
        Self {
            name: entry.name.clone(),
            location: entry.location.clone(),
            length: entry.length,
            date_of_hike: format_hike_date(&entry.date_of_hike),
            parking_available: encode_bool(entry.parking_available),
            hours: entry.hours,
            minutes: entry.minutes,
            hikers: entry.hikers,
            difficulty: entry.difficulty.as_str().to_string(),
            description: entry.description.clone(),
            animal_sightings: entry.animal_sightings.clone(),
            vegetation: entry.vegetation.clone(),
            weather: entry.weather.clone(),
            trail: entry.trail.clone(),
            time_of_observation: entry.time_of_observation.clone(),
            additional_comments: entry.additional_comments.clone(),
        }
    }

    /// Same as [`EntryParams::from_new`] for a saved entry; the ID is bound separately.
    pub fn from_entry(entry: &HikeEntry) -> Self {
        Self {
            name: entry.name.clone(),
            location: entry.location.clone(),
            length: entry.length,
            date_of_hike: format_hike_date(&entry.date_of_hike),
            parking_available: encode_bool(entry.parking_available),
            hours: entry.hours,
            minutes: entry.minutes,
            hikers: entry.hikers,
            difficulty: entry.difficulty.as_str().to_string(),
            description: entry.description.clone(),
            animal_sightings: entry.animal_sightings.clone(),
            vegetation: entry.vegetation.clone(),
            weather: entry.weather.clone(),
            trail: entry.trail.clone(),
            time_of_observation: entry.time_of_observation.clone(),
            additional_comments: entry.additional_comments.clone(),
        }
    }
}

/// Convert a SQLite row to a HikeEntry.
///
/// Expected columns: id, name, location, length, dateOfHike, parkingAvailable,
/// hours, minutes, hikers, difficulty, description, animalSightings,
/// vegetation, weather, trail, timeOfObservation, additionalComments
///
/// Rows written by older app versions may hold NULL where a number failed to
/// parse, or the raw form text where a field was cleared on edit. Both decode
/// to zero.
pub fn row_to_entry(row: &Row) -> rusqlite::Result<HikeEntry> {
    let date_of_hike: Option<String> = row.get(4)?;
    let parking_available: Option<i64> = row.get(5)?;
    let difficulty: Option<String> = row.get(9)?;

    Ok(HikeEntry {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        location: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        length: decode_length(row, 3)?,
        date_of_hike: parse_hike_date(4, date_of_hike.as_deref().unwrap_or_default())?,
        parking_available: decode_bool(parking_available.unwrap_or_default()),
        hours: decode_count(row, 6)?,
        minutes: decode_count(row, 7)?,
        hikers: decode_count(row, 8)?,
        difficulty: difficulty
            .as_deref()
            .map(Difficulty::parse)
            .unwrap_or_default(),
        description: row.get(10)?,
        animal_sightings: row.get(11)?,
        vegetation: row.get(12)?,
        weather: row.get(13)?,
        trail: row.get(14)?,
        time_of_observation: row.get(15)?,
        additional_comments: row.get(16)?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Encode a boolean as the integer stored on disk.
pub fn encode_bool(value: bool) -> i64 {
    i64::from(value)
}

/// Decode a stored integer; any non-zero value is true.
pub fn decode_bool(value: i64) -> bool {
    value != 0
}

/// Decode the `length` column. Text that isn't a finite number decodes to 0.
fn decode_length(row: &Row, idx: usize) -> rusqlite::Result<f64> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(i) => i as f64,
        ValueRef::Real(f) => f,
        ValueRef::Text(text) => parse_text::<f64>(text)
            .filter(|f| f.is_finite())
            .unwrap_or_default(),
        ValueRef::Null | ValueRef::Blob(_) => 0.0,
    })
}

/// Decode an `hours`/`minutes`/`hikers` column.
///
/// Fractional values are truncated. Text that isn't a non-negative number
/// decodes to 0; a stored number outside the `u32` range is an error.
fn decode_count(row: &Row, idx: usize) -> rusqlite::Result<u32> {
    match row.get_ref(idx)? {
        ValueRef::Integer(i) => {
            u32::try_from(i).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, i))
        }
        ValueRef::Real(f) => real_to_count(f)
            .ok_or_else(|| rusqlite::Error::IntegralValueOutOfRange(idx, f as i64)),
        ValueRef::Text(text) => Ok(parse_text::<f64>(text)
            .and_then(real_to_count)
            .unwrap_or_default()),
        ValueRef::Null | ValueRef::Blob(_) => Ok(0),
    }
}

fn real_to_count(f: f64) -> Option<u32> {
    (f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX)).then(|| f.trunc() as u32)
}

fn parse_text<T: std::str::FromStr>(text: &[u8]) -> Option<T> {
    std::str::from_utf8(text).ok()?.trim().parse().ok()
}

/// Parse a stored hike date (RFC 3339 / ISO 8601).
fn parse_hike_date(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::storage::sqlite::schema;

    fn conn() -> rusqlite::Connection {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_TABLES).unwrap();
        conn
    }

    #[test]
    fn test_encode_decode_bool() {
        assert_eq!(encode_bool(true), 1);
        assert_eq!(encode_bool(false), 0);
        assert!(decode_bool(1));
        assert!(decode_bool(-1));
        assert!(!decode_bool(0));
    }

    #[test]
    fn test_entry_params_from_new() {
        let entry = NewHikeEntry::new(
            "Snowdon",
            "Wales",
            1085.0,
            Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap(),
        )
        .with_parking(true)
        .with_difficulty(Difficulty::Moderate);

        let params = EntryParams::from_new(&entry);

        assert_eq!(params.date_of_hike, "2024-07-01T09:30:00.000Z");
        assert_eq!(params.parking_available, 1);
        assert_eq!(params.difficulty, "Moderate");
    }

    #[test]
    fn test_row_to_user() {
        let conn = conn();
        conn.execute(
            schema::INSERT_USER,
            ("alice", "alice@example.com", "secret1"),
        )
        .unwrap();

        let user = conn
            .query_row(schema::SELECT_USER_BY_ID, [1], row_to_user)
            .unwrap();

        assert_eq!(user, User::new(1, "alice", "alice@example.com", "secret1"));
    }

    #[test]
    fn test_row_to_entry_decodes_legacy_nulls() {
        let conn = conn();
        conn.execute(
            "INSERT INTO entries (name, location, length, dateOfHike, parkingAvailable, hours, difficulty)
             VALUES ('Old trail', 'Lakes', NULL, '2023-03-04T00:00:00.000Z', 1, NULL, 'easy')",
            [],
        )
        .unwrap();

        let entry = conn
            .query_row(schema::SELECT_ENTRY_BY_ID, [1], row_to_entry)
            .unwrap();

        assert_eq!(entry.name, "Old trail");
        assert_eq!(entry.length, 0.0);
        assert!(entry.parking_available);
        assert_eq!(entry.hours, 0);
        assert_eq!(entry.difficulty, Difficulty::Easy);
        assert_eq!(entry.weather, None);
    }

    #[test]
    fn test_row_to_entry_decodes_cleared_form_text() {
        let conn = conn();
        conn.execute(
            "INSERT INTO entries (name, length, dateOfHike, hours, minutes, hikers)
             VALUES ('Edited trail', '', '2023-03-04T00:00:00.000Z', '', ' 7 ', 'two')",
            [],
        )
        .unwrap();

        let entry = conn
            .query_row(schema::SELECT_ENTRY_BY_ID, [1], row_to_entry)
            .unwrap();

        assert_eq!(entry.length, 0.0);
        assert_eq!(entry.hours, 0);
        assert_eq!(entry.minutes, 7);
        assert_eq!(entry.hikers, 0);
    }

    #[test]
    fn test_row_to_entry_truncates_fractional_counts() {
        let conn = conn();
        conn.execute(
            "INSERT INTO entries (name, length, dateOfHike, hours, minutes)
             VALUES ('Half hour', '12.5', '2023-03-04T00:00:00.000Z', '1.5', 30.9)",
            [],
        )
        .unwrap();

        let entry = conn
            .query_row(schema::SELECT_ENTRY_BY_ID, [1], row_to_entry)
            .unwrap();

        assert_eq!(entry.length, 12.5);
        assert_eq!(entry.hours, 1);
        assert_eq!(entry.minutes, 30);
    }

    #[test]
    fn test_row_to_entry_rejects_negative_count() {
        let conn = conn();
        conn.execute(
            "INSERT INTO entries (name, dateOfHike, hikers)
             VALUES ('Odd', '2023-03-04T00:00:00.000Z', -2)",
            [],
        )
        .unwrap();

        let result = conn.query_row(schema::SELECT_ENTRY_BY_ID, [1], row_to_entry);

        assert!(matches!(
            result,
            Err(rusqlite::Error::IntegralValueOutOfRange(8, -2))
        ));
    }

    #[test]
    fn test_row_to_entry_rejects_unparseable_date() {
        let conn = conn();
        conn.execute(
            "INSERT INTO entries (name, dateOfHike) VALUES ('Bad date', 'last tuesday')",
            [],
        )
        .unwrap();

        let result = conn.query_row(schema::SELECT_ENTRY_BY_ID, [1], row_to_entry);

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(4, Type::Text, _))
        ));
    }

    #[test]
    fn test_parse_hike_date_accepts_offsets() {
        let parsed = parse_hike_date(4, "2025-10-31T02:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 10, 31, 0, 0, 0).unwrap());
    }
}
