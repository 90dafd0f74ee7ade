//! Row models for the five warehouse tables.
//!
//! Rows are built from the typed input records by direct field projection;
//! the only renames are `artist_latitude → latitude` and
//! `artist_longitude → longitude` on the artist dimension.

use crate::records::SongRecord;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// One row of the `artists` dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRow {
    pub artist_id: String,
    pub artist_name: String,
    pub artist_location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ArtistRow {
    pub fn from_record(record: &SongRecord) -> Self {
        Self {
            artist_id: record.artist_id.clone(),
            artist_name: record.artist_name.clone(),
            artist_location: record.artist_location.clone(),
            latitude: record.artist_latitude,
            longitude: record.artist_longitude,
        }
    }
}

/// One row of the `songs` dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
    pub song_id: String,
    pub artist_id: String,
    pub title: String,
    pub duration: f64,
    pub year: i32,
}

impl SongRow {
    pub fn from_record(record: &SongRecord) -> Self {
        Self {
            song_id: record.song_id.clone(),
            artist_id: record.artist_id.clone(),
            title: record.title.clone(),
            duration: record.duration,
            year: record.year,
        }
    }
}

/// One row of the `users` dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

/// One row of the `time` dimension. Every field other than `start_time` is a
/// pure function of `start_time`, so two rows with the same key are always
/// identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRow {
    /// Epoch milliseconds, the primary key.
    pub start_time: i64,
    pub hour: u32,
    pub day: u32,
    /// ISO-8601 week-of-year number.
    pub week: u32,
    pub month: u32,
    pub year: i32,
    /// Day of week, Monday = 0 through Sunday = 6.
    pub weekday: u32,
}

impl TimeRow {
    /// Derive the calendar breakdown from an epoch-millisecond timestamp,
    /// interpreted as UTC. Returns `None` for timestamps outside the range
    /// chrono can represent.
    pub fn from_epoch_ms(start_time: i64) -> Option<Self> {
        let dt: DateTime<Utc> = Utc.timestamp_millis_opt(start_time).single()?;
        Some(Self {
            start_time,
            hour: dt.hour(),
            day: dt.day(),
            week: dt.iso_week().week(),
            month: dt.month(),
            year: dt.year(),
            weekday: dt.weekday().num_days_from_monday(),
        })
    }
}

/// One row of the `songplays` fact table. The `songplay_id` key is assigned
/// by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct SongplayRow {
    pub start_time: i64,
    pub user_id: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: Option<i64>,
    pub item_in_session: Option<i64>,
    pub user_location: Option<String>,
    pub user_agent: Option<String>,
}
