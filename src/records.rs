//! Typed input records for the two source datasets.
//!
//! Each file format gets an explicit serde struct so that mismatched input is
//! rejected at the parse boundary instead of surfacing as a loosely-typed
//! column somewhere downstream. Song files hold exactly one JSON object; log
//! files hold one JSON object per line.

use serde::{Deserialize, Deserializer};

/// The page value marking a song-played event in the application logs.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// One song-metadata file.
#[derive(Debug, Clone, Deserialize)]
pub struct SongRecord {
    pub song_id: String,
    pub artist_id: String,
    pub title: String,
    pub duration: f64,
    pub year: i32,
    pub artist_name: String,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
}

/// One line of an application log file.
///
/// Only `page` and `ts` are mandatory at parse time: rows for other pages
/// (login, home, logout) legitimately carry nulls in most fields. Whether a
/// NextSong row is complete enough to load is checked by the log loader.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEvent {
    pub page: String,
    /// Event timestamp, epoch milliseconds.
    pub ts: i64,
    #[serde(rename = "userId", default, deserialize_with = "de_user_id")]
    pub user_id: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(rename = "location", default)]
    pub user_location: Option<String>,
    #[serde(rename = "userAgent", default)]
    pub user_agent: Option<String>,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<i64>,
    #[serde(rename = "itemInSession", default)]
    pub item_in_session: Option<i64>,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    /// Track length in seconds.
    #[serde(default)]
    pub length: Option<f64>,
}

impl LogEvent {
    pub fn is_next_song(&self) -> bool {
        self.page == NEXT_SONG_PAGE
    }
}

/// The source logs serialize `userId` inconsistently: as a JSON number, as a
/// string of digits, or as an empty string for anonymous sessions. All three
/// map onto `Option<String>`, empty meaning absent.
fn de_user_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawUserId {
        Number(i64),
        Text(String),
    }

    let raw: Option<RawUserId> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawUserId::Number(n)) => Some(n.to_string()),
        Some(RawUserId::Text(s)) if s.is_empty() => None,
        Some(RawUserId::Text(s)) => Some(s),
    })
}
