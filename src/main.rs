use anyhow::Result;
use clap::Parser;
use songplay_etl::config::{AppConfig, CliConfig, FileConfig};
use songplay_etl::pipeline;
use songplay_etl::warehouse::UserConflictPolicy;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "songplay-etl")]
#[command(about = "Load song metadata and listening logs into a star-schema SQLite database")]
struct CliArgs {
    /// Path to the SQLite warehouse database file (created if missing).
    #[clap(env = "SONGPLAY_DATABASE")]
    pub database: Option<PathBuf>,

    /// Root directory of the song-metadata dataset.
    #[clap(long, env = "SONGPLAY_SONG_DATA")]
    pub song_data: Option<PathBuf>,

    /// Root directory of the application-log dataset.
    #[clap(long, env = "SONGPLAY_LOG_DATA")]
    pub log_data: Option<PathBuf>,

    /// What wins when a log file carries a user the warehouse already has.
    #[clap(long, value_enum, default_value = "ignore")]
    pub user_conflict: UserConflictPolicy,

    /// Drop and re-create all tables before loading.
    #[clap(long, default_value_t = false)]
    pub recreate_schema: bool,

    /// Optional TOML config file; its values override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;

    let config = AppConfig::resolve(
        &CliConfig {
            database: cli_args.database,
            song_data: cli_args.song_data,
            log_data: cli_args.log_data,
            user_conflict: cli_args.user_conflict,
            recreate_schema: cli_args.recreate_schema,
        },
        file_config,
    )?;

    pipeline::run(&config)?;
    Ok(())
}
