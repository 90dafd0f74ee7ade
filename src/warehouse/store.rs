//! SQLite-backed warehouse store.
//!
//! A thin handle around one `rusqlite::Connection`. The batch driver opens a
//! transaction per input file through [`SqliteWarehouse::file_transaction`];
//! dropping an uncommitted transaction rolls it back, so an error path never
//! leaves a half-loaded file behind.

use super::models::{ArtistRow, SongRow, SongplayRow, TimeRow, UserRow};
use super::schema::WAREHOUSE_SCHEMA;
use super::statements::{
    user_insert_sql, UserConflictPolicy, ARTIST_INSERT, SONGPLAY_INSERT, SONG_INSERT, SONG_SELECT,
    TIME_INSERT,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use tracing::info;

pub struct SqliteWarehouse {
    conn: Connection,
}

impl SqliteWarehouse {
    /// Open (or create) the warehouse database at `db_path`. A brand new
    /// database gets the schema created; an existing one is validated against
    /// the declared tables. With `recreate_schema` all tables are dropped and
    /// re-created instead, so a database with a drifted schema can still be
    /// rebuilt.
    pub fn open<P: AsRef<Path>>(db_path: P, recreate_schema: bool) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())
            .with_context(|| format!("Failed to open database {}", db_path.as_ref().display()))?;
        Self::from_connection(conn, recreate_schema)
    }

    /// In-memory warehouse, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, false)
    }

    fn from_connection(conn: Connection, recreate_schema: bool) -> Result<Self> {
        // The bundled SQLite enables foreign_keys by default; the fact
        // table's references are soft (unresolved plays keep null song and
        // artist ids), so enforcement is switched off here.
        conn.execute("PRAGMA foreign_keys = OFF;", [])?;

        if recreate_schema {
            info!("Re-creating warehouse schema");
            WAREHOUSE_SCHEMA.drop(&conn)?;
            WAREHOUSE_SCHEMA.create(&conn)?;
            return Ok(Self { conn });
        }

        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )?;

        if table_count == 0 {
            info!("Creating warehouse schema");
            WAREHOUSE_SCHEMA.create(&conn)?;
        } else {
            WAREHOUSE_SCHEMA
                .validate(&conn)
                .context("Existing database does not match the warehouse schema")?;
        }

        Ok(Self { conn })
    }

    /// Start the per-file transaction. Inserts issued through `&self` while
    /// the transaction is live belong to it; commit with
    /// [`Transaction::commit`], or drop it to roll back.
    pub fn file_transaction(&self) -> Result<Transaction<'_>> {
        Ok(self.conn.unchecked_transaction()?)
    }

    pub fn insert_song(&self, row: &SongRow) -> Result<()> {
        self.conn.execute(
            SONG_INSERT,
            params![row.song_id, row.artist_id, row.title, row.duration, row.year],
        )?;
        Ok(())
    }

    pub fn insert_artist(&self, row: &ArtistRow) -> Result<()> {
        self.conn.execute(
            ARTIST_INSERT,
            params![
                row.artist_id,
                row.artist_name,
                row.artist_location,
                row.latitude,
                row.longitude
            ],
        )?;
        Ok(())
    }

    pub fn insert_time(&self, row: &TimeRow) -> Result<()> {
        self.conn.execute(
            TIME_INSERT,
            params![
                row.start_time,
                row.hour,
                row.day,
                row.week,
                row.month,
                row.year,
                row.weekday
            ],
        )?;
        Ok(())
    }

    pub fn upsert_user(&self, row: &UserRow, policy: UserConflictPolicy) -> Result<()> {
        self.conn.execute(
            user_insert_sql(policy),
            params![
                row.user_id,
                row.first_name,
                row.last_name,
                row.gender,
                row.level
            ],
        )?;
        Ok(())
    }

    pub fn insert_songplay(&self, row: &SongplayRow) -> Result<()> {
        self.conn.execute(
            SONGPLAY_INSERT,
            params![
                row.start_time,
                row.user_id,
                row.song_id,
                row.artist_id,
                row.session_id,
                row.item_in_session,
                row.user_location,
                row.user_agent
            ],
        )?;
        Ok(())
    }

    /// Look up the (song_id, artist_id) pair whose title, artist name and
    /// duration exactly equal the given values. `None` when no song matches.
    pub fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<(String, String)>> {
        let result = self
            .conn
            .query_row(SONG_SELECT, params![title, artist_name, duration], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .optional()?;
        Ok(result)
    }

    pub fn table_counts(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<i64> {
            Ok(self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?)
        };
        Ok(TableCounts {
            artists: count("artists")?,
            songs: count("songs")?,
            time: count("time")?,
            users: count("users")?,
            songplays: count("songplays")?,
        })
    }
}

/// Row counts per table, logged as the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub artists: i64,
    pub songs: i64,
    pub time: i64,
    pub users: i64,
    pub songplays: i64,
}
