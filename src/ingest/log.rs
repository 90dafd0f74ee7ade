//! Log Record Loader: one JSON-lines log file → time, user and songplay rows.

use super::IngestError;
use crate::records::LogEvent;
use crate::warehouse::{SongplayRow, SqliteWarehouse, TimeRow, UserConflictPolicy, UserRow};
use anyhow::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Per-file outcome, used for the end-of-run summary log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFileStats {
    /// Lines parsed from the file.
    pub events: usize,
    /// Events retained after the NextSong filter; one fact row each.
    pub plays: usize,
    /// Plays resolved to a non-null (song_id, artist_id) pair.
    pub resolved: usize,
}

/// Parse one application-log file and load its time, user and songplay rows.
///
/// Steps, in order: parse every line, keep NextSong events, insert one time
/// row per distinct timestamp, upsert one user row per event (the conflict
/// policy decides whether first- or last-seen values win), then insert one
/// fact row per event with the song/artist pair resolved by exact
/// (title, artist name, duration) lookup — null references when no match.
pub fn process_log_file(
    warehouse: &SqliteWarehouse,
    path: &Path,
    user_conflict: UserConflictPolicy,
) -> Result<LogFileStats> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Parse everything up front so a malformed line aborts before any insert.
    let mut events: Vec<(usize, LogEvent)> = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event: LogEvent =
            serde_json::from_str(line).map_err(|source| IngestError::MalformedJson {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
        events.push((index + 1, event));
    }
    let total_events = events.len();

    let plays: Vec<(usize, LogEvent)> = events
        .into_iter()
        .filter(|(_, event)| event.is_next_song())
        .collect();

    // Time dimension: one row per distinct timestamp in the file.
    let mut timestamps = BTreeSet::new();
    for (line, event) in &plays {
        if !timestamps.insert(event.ts) {
            continue;
        }
        let row = TimeRow::from_epoch_ms(event.ts).ok_or_else(|| IngestError::InvalidRecord {
            path: path.to_path_buf(),
            line: *line,
            reason: format!("timestamp {} is out of range", event.ts),
        })?;
        warehouse.insert_time(&row)?;
    }

    // User dimension: upsert in file order; duplicates within the file are
    // handled by the conflict policy (first-seen wins under `ignore`,
    // last-seen wins under `overwrite`).
    for (line, event) in &plays {
        let user_id = require_user_id(event, path, *line)?;
        warehouse.upsert_user(
            &UserRow {
                user_id,
                first_name: event.first_name.clone(),
                last_name: event.last_name.clone(),
                gender: event.gender.clone(),
                level: event.level.clone(),
            },
            user_conflict,
        )?;
    }

    // Fact rows: one per play, never deduplicated.
    let mut resolved = 0usize;
    for (line, event) in &plays {
        let user_id = require_user_id(event, path, *line)?;

        let song_match = match (&event.song, &event.artist, event.length) {
            (Some(song), Some(artist), Some(length)) => {
                warehouse.find_song(song, artist, length)?
            }
            _ => None,
        };
        if song_match.is_some() {
            resolved += 1;
        }
        let (song_id, artist_id) = match song_match {
            Some((song_id, artist_id)) => (Some(song_id), Some(artist_id)),
            None => (None, None),
        };

        warehouse.insert_songplay(&SongplayRow {
            start_time: event.ts,
            user_id,
            song_id,
            artist_id,
            session_id: event.session_id,
            item_in_session: event.item_in_session,
            user_location: event.user_location.clone(),
            user_agent: event.user_agent.clone(),
        })?;
    }

    Ok(LogFileStats {
        events: total_events,
        plays: plays.len(),
        resolved,
    })
}

fn require_user_id(event: &LogEvent, path: &Path, line: usize) -> Result<String, IngestError> {
    event
        .user_id
        .clone()
        .ok_or_else(|| IngestError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            reason: "NextSong event has no userId".to_string(),
        })
}
