//! Parameterized statement catalog.
//!
//! Every insert names its conflict policy explicitly. Dimensions keyed by a
//! natural id are insert-or-ignore so reprocessing a file never errors and
//! never duplicates a row; the fact table is a plain insert, so reprocessing
//! duplicates facts (accepted, there is no natural key on plays).

use clap::ValueEnum;
use serde::Deserialize;

/// Insert-or-ignore: a song file reprocessed after a crash is a no-op.
pub const SONG_INSERT: &str = "\
    INSERT INTO songs (song_id, artist_id, title, duration, year) \
    VALUES (?1, ?2, ?3, ?4, ?5) \
    ON CONFLICT (song_id) DO NOTHING;";

/// Insert-or-ignore: artists recur across song files.
pub const ARTIST_INSERT: &str = "\
    INSERT INTO artists (artist_id, artist_name, artist_location, latitude, longitude) \
    VALUES (?1, ?2, ?3, ?4, ?5) \
    ON CONFLICT (artist_id) DO NOTHING;";

/// Insert-or-ignore keyed on the timestamp: the derived columns are a pure
/// function of the key, so the ignored row would have been identical anyway.
pub const TIME_INSERT: &str = "\
    INSERT INTO time (start_time, hour, day, week, month, year, weekday) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
    ON CONFLICT (start_time) DO NOTHING;";

const USER_INSERT_IGNORE: &str = "\
    INSERT INTO users (user_id, first_name, last_name, gender, level) \
    VALUES (?1, ?2, ?3, ?4, ?5) \
    ON CONFLICT (user_id) DO NOTHING;";

const USER_INSERT_OVERWRITE: &str = "\
    INSERT INTO users (user_id, first_name, last_name, gender, level) \
    VALUES (?1, ?2, ?3, ?4, ?5) \
    ON CONFLICT (user_id) DO UPDATE SET \
        first_name = excluded.first_name, \
        last_name = excluded.last_name, \
        gender = excluded.gender, \
        level = excluded.level;";

/// Plain insert; songplay_id is assigned by the database.
pub const SONGPLAY_INSERT: &str = "\
    INSERT INTO songplays \
    (start_time, user_id, song_id, artist_id, session_id, item_in_session, user_location, user_agent) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);";

/// Resolve a play to a (song_id, artist_id) pair by exact equality on title,
/// artist name and duration.
pub const SONG_SELECT: &str = "\
    SELECT s.song_id, a.artist_id \
    FROM songs AS s \
    JOIN artists AS a ON s.artist_id = a.artist_id \
    WHERE s.title = ?1 AND a.artist_name = ?2 AND s.duration = ?3;";

/// What to do when a log file carries a user_id the users table already has.
/// Whether first- or last-seen values should win depends on the deployment,
/// so the choice is configuration, not a default baked into the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserConflictPolicy {
    /// First-seen values win; later rows for the same user are dropped.
    #[default]
    Ignore,
    /// Last-seen values win; mutable fields like `level` track the latest row.
    Overwrite,
}

pub fn user_insert_sql(policy: UserConflictPolicy) -> &'static str {
    match policy {
        UserConflictPolicy::Ignore => USER_INSERT_IGNORE,
        UserConflictPolicy::Overwrite => USER_INSERT_OVERWRITE,
    }
}
