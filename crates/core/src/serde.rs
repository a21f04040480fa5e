//! Serde helper functions for entry records and form payloads.
//!
//! Form screens send every field as text, but some callers pass numbers
//! directly. Empty strings are treated as None for optional fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::hike::format_hike_date;

/// Serialize a hike date in the same text shape the store writes.
pub fn serialize_hike_date<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_hike_date(date))
}

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a field that may be sent either as a string or as a JSON number,
/// keeping its textual form. Missing or null values become an empty string.
pub fn deserialize_numeric_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumericText {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    let value: Option<NumericText> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(NumericText::Text(s)) => s,
        Some(NumericText::Integer(n)) => n.to_string(),
        Some(NumericText::Float(n)) => n.to_string(),
        None => String::new(),
    })
}
