//! File loaders for the two source datasets.

mod log;
mod song;

pub use log::{process_log_file, LogFileStats};
pub use song::process_song_file;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort ingestion of a file. Malformed input never produces
/// partial rows; the surrounding per-file transaction is rolled back.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: invalid JSON: {source}")]
    MalformedJson {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}:{line}: {reason}")]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}
