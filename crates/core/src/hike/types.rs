use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A registered account on this device.
///
/// Usernames and emails are not unique; two accounts may carry identical fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Creates a user record with a known ID.
    pub fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns true if all three credential fields match exactly.
    pub fn matches_credentials(&self, username: &str, email: &str, password: &str) -> bool {
        self.username == username && self.email == email && self.password == password
    }
}

/// How hard a hike was.
///
/// The stored column is free text. The three conventional values get their own
/// variants; anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Hard,
    Other(String),
}

impl Difficulty {
    /// Parses a stored or user-supplied value. Known values match case-insensitively.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "moderate" => Difficulty::Moderate,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Other(s.to_string()),
        }
    }

    /// Returns the text written to the `difficulty` column.
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::Other(s) => s,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Difficulty::parse(&s))
    }
}

/// Formats a hike date the way it is stored: `2025-10-31T00:00:00.000Z`.
///
/// Millisecond precision is the stored shape. Dates with a finer fraction
/// switch to microseconds or nanoseconds so the value reads back unchanged.
pub fn format_hike_date(date: &DateTime<Utc>) -> String {
    let nanos = date.timestamp_subsec_nanos() % 1_000_000_000;
    let precision = if nanos % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else if nanos % 1_000 == 0 {
        SecondsFormat::Micros
    } else {
        SecondsFormat::Nanos
    };
    date.to_rfc3339_opts(precision, true)
}

/// A hike entry that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHikeEntry {
    pub name: String,
    pub location: String,
    /// Trail length in metres.
    pub length: f64,
    /// Serialized in the stored shape, see [`format_hike_date`].
    #[serde(serialize_with = "crate::serde::serialize_hike_date")]
    pub date_of_hike: DateTime<Utc>,
    pub parking_available: bool,
    pub hours: u32,
    pub minutes: u32,
    pub hikers: u32,
    pub difficulty: Difficulty,
    pub description: Option<String>,
    pub animal_sightings: Option<String>,
    pub vegetation: Option<String>,
    pub weather: Option<String>,
    pub trail: Option<String>,
    pub time_of_observation: Option<String>,
    pub additional_comments: Option<String>,
}

impl NewHikeEntry {
    /// Creates an entry with the required trip fields and no observations.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        length: f64,
        date_of_hike: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            length,
            date_of_hike,
            ..Self::default()
        }
    }

    /// Sets whether parking is available at the trailhead.
    pub fn with_parking(mut self, parking_available: bool) -> Self {
        self.parking_available = parking_available;
        self
    }

    /// Sets the hike duration.
    pub fn with_duration(mut self, hours: u32, minutes: u32) -> Self {
        self.hours = hours;
        self.minutes = minutes;
        self
    }

    /// Sets the number of people on the hike.
    pub fn with_hikers(mut self, hikers: u32) -> Self {
        self.hikers = hikers;
        self
    }

    /// Sets the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the weather observation.
    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Sets the trail observation.
    pub fn with_trail(mut self, trail: impl Into<String>) -> Self {
        self.trail = Some(trail.into());
        self
    }
}

/// A saved hike entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HikeEntry {
    pub id: i64,
    pub name: String,
    pub location: String,
    /// Trail length in metres.
    pub length: f64,
    /// Serialized in the stored shape, see [`format_hike_date`].
    #[serde(serialize_with = "crate::serde::serialize_hike_date")]
    pub date_of_hike: DateTime<Utc>,
    pub parking_available: bool,
    pub hours: u32,
    pub minutes: u32,
    pub hikers: u32,
    pub difficulty: Difficulty,
    pub description: Option<String>,
    pub animal_sightings: Option<String>,
    pub vegetation: Option<String>,
    pub weather: Option<String>,
    pub trail: Option<String>,
    pub time_of_observation: Option<String>,
    pub additional_comments: Option<String>,
}

impl HikeEntry {
    /// Attaches a store-assigned ID to an unsaved entry.
    pub fn from_new(id: i64, entry: NewHikeEntry) -> Self {
        Self {
            id,
            name: entry.name,
            location: entry.location,
            length: entry.length,
            date_of_hike: entry.date_of_hike,
            parking_available: entry.parking_available,
            hours: entry.hours,
            minutes: entry.minutes,
            hikers: entry.hikers,
            difficulty: entry.difficulty,
            description: entry.description,
            animal_sightings: entry.animal_sightings,
            vegetation: entry.vegetation,
            weather: entry.weather,
            trail: entry.trail,
            time_of_observation: entry.time_of_observation,
            additional_comments: entry.additional_comments,
        }
    }

    /// Drops the ID, returning the replaceable fields.
    pub fn into_new(self) -> NewHikeEntry {
        NewHikeEntry {
            name: self.name,
            location: self.location,
            length: self.length,
            date_of_hike: self.date_of_hike,
            parking_available: self.parking_available,
            hours: self.hours,
            minutes: self.minutes,
            hikers: self.hikers,
            difficulty: self.difficulty,
            description: self.description,
            animal_sightings: self.animal_sightings,
            vegetation: self.vegetation,
            weather: self.weather,
            trail: self.trail,
            time_of_observation: self.time_of_observation,
            additional_comments: self.additional_comments,
        }
    }

    /// Total duration in minutes.
    pub fn total_minutes(&self) -> u64 {
        u64::from(self.hours) * 60 + u64::from(self.minutes)
    }
}
