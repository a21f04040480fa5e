//! Entry form payloads.
//!
//! The entry screens hold every field as display text. `EntryForm` is the
//! boundary where that text becomes a typed `NewHikeEntry`, rejecting malformed
//! numbers and dates instead of storing not-a-number values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::EntryFormError;
use super::types::{format_hike_date, Difficulty, HikeEntry, NewHikeEntry};
use crate::serde::{deserialize_numeric_text, deserialize_optional_string};

/// Raw entry form input as collected by the add/edit screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_numeric_text")]
    pub length: String,
    #[serde(default)]
    pub date_of_hike: String,
    #[serde(default)]
    pub parking_available: bool,
    #[serde(default, deserialize_with = "deserialize_numeric_text")]
    pub hours: String,
    #[serde(default, deserialize_with = "deserialize_numeric_text")]
    pub minutes: String,
    #[serde(default, deserialize_with = "deserialize_numeric_text")]
    pub hikers: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_sightings: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vegetation: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_observation: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_comments: Option<String>,
}

impl EntryForm {
    /// Renders a saved entry back into form text for the edit screen.
    pub fn from_entry(entry: &HikeEntry) -> Self {
        Self {
            name: entry.name.clone(),
            location: entry.location.clone(),
            length: entry.length.to_string(),
            date_of_hike: format_hike_date(&entry.date_of_hike),
            parking_available: entry.parking_available,
            hours: entry.hours.to_string(),
            minutes: entry.minutes.to_string(),
            hikers: entry.hikers.to_string(),
            difficulty: entry.difficulty.to_string(),
            description: entry.description.clone(),
            animal_sightings: entry.animal_sightings.clone(),
            vegetation: entry.vegetation.clone(),
            weather: entry.weather.clone(),
            trail: entry.trail.clone(),
            time_of_observation: entry.time_of_observation.clone(),
            additional_comments: entry.additional_comments.clone(),
        }
    }

    /// Parses the form into an unsaved entry.
    pub fn into_new_entry(self) -> Result<NewHikeEntry, EntryFormError> {
        let length = parse_length(&self.length)?;
        let hours = parse_count("hours", &self.hours)?;
        let minutes = parse_count("minutes", &self.minutes)?;
        let hikers = parse_count("hikers", &self.hikers)?;
        let date_of_hike = parse_hike_date(&self.date_of_hike)?;

        Ok(NewHikeEntry {
            name: self.name,
            location: self.location,
            length,
            date_of_hike,
            parking_available: self.parking_available,
            hours,
            minutes,
            hikers,
            difficulty: Difficulty::parse(&self.difficulty),
            description: blank_to_none(self.description),
            animal_sightings: blank_to_none(self.animal_sightings),
            vegetation: blank_to_none(self.vegetation),
            weather: blank_to_none(self.weather),
            trail: blank_to_none(self.trail),
            time_of_observation: blank_to_none(self.time_of_observation),
            additional_comments: blank_to_none(self.additional_comments),
        })
    }

    /// Parses the form into a full replacement for the entry with `id`.
    pub fn into_entry(self, id: i64) -> Result<HikeEntry, EntryFormError> {
        self.into_new_entry()
            .map(|entry| HikeEntry::from_new(id, entry))
    }
}

fn parse_length(value: &str) -> Result<f64, EntryFormError> {
    let invalid = || EntryFormError::InvalidNumber {
        field: "length",
        value: value.to_string(),
    };
    let length: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !length.is_finite() || length < 0.0 {
        return Err(invalid());
    }
    Ok(length)
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, EntryFormError> {
    value
        .trim()
        .parse()
        .map_err(|_| EntryFormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_hike_date(value: &str) -> Result<DateTime<Utc>, EntryFormError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| EntryFormError::InvalidDate(value.to_string()))
}

// Struct literals bypass the serde helpers, so blanks are filtered again here.
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
