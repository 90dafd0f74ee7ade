//! Star-schema warehouse: row models, schema, statements, SQLite store.

mod models;
mod schema;
mod statements;
mod store;

pub use models::{ArtistRow, SongRow, SongplayRow, TimeRow, UserRow};
pub use schema::WAREHOUSE_SCHEMA;
pub use statements::{
    user_insert_sql, UserConflictPolicy, ARTIST_INSERT, SONGPLAY_INSERT, SONG_INSERT, SONG_SELECT,
    TIME_INSERT,
};
pub use store::{SqliteWarehouse, TableCounts};
