//! Shared fixtures for the end-to-end ingestion tests.

#![allow(dead_code)]

use rusqlite::Connection;
use songplay_etl::config::{AppConfig, UserConflictPolicy};
use songplay_etl::pipeline;
use songplay_etl::warehouse::TableCounts;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SONG_1_ID: &str = "S1";
pub const ARTIST_1_ID: &str = "A1";
pub const SONG_1_TITLE: &str = "Song One";
pub const ARTIST_1_NAME: &str = "Artist One";
pub const SONG_1_DURATION: f64 = 210.5;

/// The song file from the reference scenario.
pub const SONG_1_JSON: &str = r#"{"song_id":"S1","artist_id":"A1","title":"Song One","duration":210.5,"year":2001,"artist_name":"Artist One","artist_location":"NYC","artist_latitude":40.7,"artist_longitude":-74.0}"#;

/// Build one NextSong log line.
pub fn next_song_line(user_id: &str, ts: i64, song: &str, artist: &str, length: f64) -> String {
    format!(
        r#"{{"page":"NextSong","ts":{ts},"userId":"{user_id}","firstName":"Kaylee","lastName":"Summers","gender":"F","level":"free","location":"Phoenix-Mesa-Scottsdale, AZ","userAgent":"Mozilla/5.0","sessionId":139,"itemInSession":1,"song":"{song}","artist":"{artist}","length":{length}}}"#
    )
}

/// Same shape but with an explicit subscription level.
pub fn next_song_line_with_level(
    user_id: &str,
    ts: i64,
    song: &str,
    artist: &str,
    length: f64,
    level: &str,
) -> String {
    format!(
        r#"{{"page":"NextSong","ts":{ts},"userId":"{user_id}","firstName":"Kaylee","lastName":"Summers","gender":"F","level":"{level}","sessionId":139,"itemInSession":1,"song":"{song}","artist":"{artist}","length":{length}}}"#
    )
}

/// A dataset tree on disk plus the run configuration pointing at it.
pub struct TestDataset {
    dir: TempDir,
    pub config: AppConfig,
}

impl TestDataset {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let song_data = dir.path().join("song_data");
        let log_data = dir.path().join("log_data");
        fs::create_dir_all(&song_data).unwrap();
        fs::create_dir_all(&log_data).unwrap();

        let config = AppConfig {
            database: dir.path().join("warehouse.db"),
            song_data,
            log_data,
            user_conflict: UserConflictPolicy::Ignore,
            recreate_schema: false,
        };
        Self { dir, config }
    }

    pub fn add_song_file(&self, name: &str, contents: &str) {
        let path = self.config.song_data.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn add_log_file(&self, name: &str, lines: &[String]) {
        let path = self.config.log_data.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, lines.join("\n")).unwrap();
    }

    pub fn run(&self) -> anyhow::Result<TableCounts> {
        pipeline::run(&self.config)
    }

    /// Open the warehouse database directly for assertions.
    pub fn db(&self) -> Connection {
        Connection::open(&self.config.database).unwrap()
    }

    pub fn db_path(&self) -> PathBuf {
        self.config.database.clone()
    }
}
