//! SQLite schema definitions and SQL query constants.
//!
//! Table and column names match the layout the M-Hike mobile app writes, so an
//! existing `m-hike.db` opens unchanged.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    location TEXT,
    length REAL,
    dateOfHike TEXT,
    parkingAvailable INTEGER,
    hours INTEGER,
    minutes INTEGER,
    hikers INTEGER,
    difficulty TEXT,
    description TEXT,
    animalSightings TEXT,
    vegetation TEXT,
    weather TEXT,
    trail TEXT,
    timeOfObservation TEXT,
    additionalComments TEXT
);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (username, email, password)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_ALL_USERS: &str = r#"
SELECT id, username, email, password
FROM users
ORDER BY id ASC
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, username, email, password
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_CREDENTIALS: &str = r#"
SELECT id, username, email, password
FROM users
WHERE username = ?1 AND email = ?2 AND password = ?3
ORDER BY id ASC
LIMIT 1
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET username = ?2, email = ?3, password = ?4
WHERE id = ?1
"#;

pub const UPDATE_PASSWORD: &str = r#"
UPDATE users
SET password = ?3
WHERE username = ?1 AND email = ?2
"#;

// Entry queries
pub const INSERT_ENTRY: &str = r#"
INSERT INTO entries (
    name, location, length, dateOfHike, parkingAvailable,
    hours, minutes, hikers, difficulty, description,
    animalSightings, vegetation, weather, trail,
    timeOfObservation, additionalComments
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
"#;

pub const SELECT_ALL_ENTRIES: &str = r#"
SELECT id, name, location, length, dateOfHike, parkingAvailable,
       hours, minutes, hikers, difficulty, description,
       animalSightings, vegetation, weather, trail,
       timeOfObservation, additionalComments
FROM entries
ORDER BY id DESC
"#;

pub const SELECT_ENTRY_BY_ID: &str = r#"
SELECT id, name, location, length, dateOfHike, parkingAvailable,
       hours, minutes, hikers, difficulty, description,
       animalSightings, vegetation, weather, trail,
       timeOfObservation, additionalComments
FROM entries
WHERE id = ?1
"#;

pub const UPDATE_ENTRY: &str = r#"
UPDATE entries
SET name = ?2, location = ?3, length = ?4, dateOfHike = ?5, parkingAvailable = ?6,
    hours = ?7, minutes = ?8, hikers = ?9, difficulty = ?10, description = ?11,
    animalSightings = ?12, vegetation = ?13, weather = ?14, trail = ?15,
    timeOfObservation = ?16, additionalComments = ?17
WHERE id = ?1
"#;

pub const DELETE_ENTRY: &str = r#"
DELETE FROM entries
WHERE id = ?1
"#;
