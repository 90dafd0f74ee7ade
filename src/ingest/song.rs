//! Song Record Loader: one song-metadata file → one song row + one artist row.

use super::IngestError;
use crate::records::SongRecord;
use crate::warehouse::{ArtistRow, SongRow, SqliteWarehouse};
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Parse one song-metadata file and insert its song and artist rows.
///
/// The file holds exactly one JSON object. Malformed JSON or missing fields
/// abort with a named error; nothing is inserted for that file.
pub fn process_song_file(warehouse: &SqliteWarehouse, path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let record: SongRecord =
        serde_json::from_str(contents.trim()).map_err(|source| IngestError::MalformedJson {
            path: path.to_path_buf(),
            line: 1,
            source,
        })?;

    warehouse.insert_song(&SongRow::from_record(&record))?;
    warehouse.insert_artist(&ArtistRow::from_record(&record))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const SONG_ONE: &str = r#"{"song_id":"S1","artist_id":"A1","title":"Song One","duration":210.5,"year":2001,"artist_name":"Artist One","artist_location":"NYC","artist_latitude":40.7,"artist_longitude":-74.0}"#;

    #[test]
    fn test_loads_one_song_and_one_artist() {
        let warehouse = SqliteWarehouse::open_in_memory().unwrap();
        let file = write_file(SONG_ONE);

        process_song_file(&warehouse, file.path()).unwrap();

        let counts = warehouse.table_counts().unwrap();
        assert_eq!(counts.songs, 1);
        assert_eq!(counts.artists, 1);
        assert_eq!(
            warehouse.find_song("Song One", "Artist One", 210.5).unwrap(),
            Some(("S1".to_string(), "A1".to_string()))
        );
    }

    #[test]
    fn test_reprocessing_the_same_file_is_a_no_op() {
        let warehouse = SqliteWarehouse::open_in_memory().unwrap();
        let file = write_file(SONG_ONE);

        process_song_file(&warehouse, file.path()).unwrap();
        process_song_file(&warehouse, file.path()).unwrap();

        let counts = warehouse.table_counts().unwrap();
        assert_eq!(counts.songs, 1);
        assert_eq!(counts.artists, 1);
    }

    #[test]
    fn test_malformed_json_aborts_without_inserting() {
        let warehouse = SqliteWarehouse::open_in_memory().unwrap();
        let file = write_file("{not json");

        let result = process_song_file(&warehouse, file.path());
        assert!(result.is_err());
        assert_eq!(warehouse.table_counts().unwrap().songs, 0);
    }

    #[test]
    fn test_missing_required_field_aborts() {
        let warehouse = SqliteWarehouse::open_in_memory().unwrap();
        let file = write_file(r#"{"song_id":"S1","artist_id":"A1"}"#);

        let result = process_song_file(&warehouse, file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid JSON"));
        assert_eq!(warehouse.table_counts().unwrap().songs, 0);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let warehouse = SqliteWarehouse::open_in_memory().unwrap();
        let result = process_song_file(&warehouse, Path::new("/nonexistent/song.json"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("failed to read"));
    }
}
