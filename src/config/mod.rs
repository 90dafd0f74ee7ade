mod file_config;

pub use file_config::FileConfig;

pub use crate::warehouse::UserConflictPolicy;

use anyhow::{bail, Result};
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub database: Option<PathBuf>,
    pub song_data: Option<PathBuf>,
    pub log_data: Option<PathBuf>,
    pub user_conflict: UserConflictPolicy,
    pub recreate_schema: bool,
}

/// Fully-resolved run configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file to load into (created if missing).
    pub database: PathBuf,
    /// Root of the song-metadata dataset.
    pub song_data: PathBuf,
    /// Root of the application-log dataset.
    pub log_data: PathBuf,
    /// Conflict policy for the users dimension.
    pub user_conflict: UserConflictPolicy,
    /// Drop and re-create all tables before loading.
    pub recreate_schema: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let database = file
            .database
            .map(PathBuf::from)
            .or_else(|| cli.database.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("database must be specified as an argument or in the config file")
            })?;

        let song_data = file
            .song_data
            .map(PathBuf::from)
            .or_else(|| cli.song_data.clone())
            .unwrap_or_else(|| PathBuf::from("data/song_data"));

        let log_data = file
            .log_data
            .map(PathBuf::from)
            .or_else(|| cli.log_data.clone())
            .unwrap_or_else(|| PathBuf::from("data/log_data"));

        // Missing dataset roots are fatal at startup, before the database is
        // touched
        if !song_data.is_dir() {
            bail!("Song data directory does not exist: {:?}", song_data);
        }
        if !log_data.is_dir() {
            bail!("Log data directory does not exist: {:?}", log_data);
        }

        let user_conflict = file.user_conflict.unwrap_or(cli.user_conflict);

        Ok(Self {
            database,
            song_data,
            log_data,
            user_conflict,
            recreate_schema: cli.recreate_schema,
        })
    }
}
