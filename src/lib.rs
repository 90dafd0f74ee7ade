//! Songplay ETL Library
//!
//! Batch loader that walks JSON song-metadata and application-log datasets
//! and loads them into a star-schema SQLite database (songs, artists, users,
//! time, songplays). The modules are exposed for the end-to-end test suite.

pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod records;
pub mod sqlite_persistence;
pub mod walker;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig, UserConflictPolicy};
pub use ingest::IngestError;
pub use warehouse::SqliteWarehouse;
