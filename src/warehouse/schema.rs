//! Warehouse schema: four dimensions and one fact table.
//!
//! Table order is dependency order. `songplays` references all four
//! dimensions, so it comes last; dropping walks the same list in reverse.
//! References are soft: `song_id` and `artist_id` in the fact table stay null
//! when a play cannot be resolved against the songs/artists dimensions.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, Schema, SqlType, Table};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("artist_name", &SqlType::Text, non_null = true),
        sqlite_column!("artist_location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("song_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("artist_id", &SqlType::Text),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("duration", &SqlType::Real),
        sqlite_column!("year", &SqlType::Integer),
    ],
};

const TIME_TABLE: Table = Table {
    name: "time",
    // start_time is the epoch-millisecond event timestamp; the remaining
    // columns derive from it and are therefore non-null whenever the key is.
    columns: &[
        sqlite_column!("start_time", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("hour", &SqlType::Integer, non_null = true),
        sqlite_column!("day", &SqlType::Integer, non_null = true),
        sqlite_column!("week", &SqlType::Integer, non_null = true),
        sqlite_column!("month", &SqlType::Integer, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("weekday", &SqlType::Integer, non_null = true),
    ],
};

const USERS_TABLE: Table = Table {
    // user_id keeps the source's text representation rather than converting
    // to an integer
    name: "users",
    columns: &[
        sqlite_column!("user_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!("gender", &SqlType::Text),
        sqlite_column!("level", &SqlType::Text),
    ],
};

const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!(
            "songplay_id",
            &SqlType::Integer,
            is_primary_key = true,
            autoincrement = true
        ),
        sqlite_column!(
            "start_time",
            &SqlType::Integer,
            non_null = true,
            references = Some(("time", "start_time"))
        ),
        sqlite_column!(
            "user_id",
            &SqlType::Text,
            non_null = true,
            references = Some(("users", "user_id"))
        ),
        sqlite_column!(
            "song_id",
            &SqlType::Text,
            references = Some(("songs", "song_id"))
        ),
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            references = Some(("artists", "artist_id"))
        ),
        sqlite_column!("session_id", &SqlType::Integer),
        sqlite_column!("item_in_session", &SqlType::Integer),
        sqlite_column!("user_location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
};

pub const WAREHOUSE_SCHEMA: Schema = Schema {
    tables: &[
        ARTISTS_TABLE,
        SONGS_TABLE,
        TIME_TABLE,
        USERS_TABLE,
        SONGPLAYS_TABLE,
    ],
};
