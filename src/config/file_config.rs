use crate::warehouse::UserConflictPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub database: Option<String>,
    pub song_data: Option<String>,
    pub log_data: Option<String>,
    pub user_conflict: Option<UserConflictPolicy>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database = \"warehouse.db\"\nsong_data = \"data/song_data\"\nlog_data = \"data/log_data\"\nuser_conflict = \"overwrite\""
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.database.as_deref(), Some("warehouse.db"));
        assert_eq!(config.song_data.as_deref(), Some("data/song_data"));
        assert_eq!(config.log_data.as_deref(), Some("data/log_data"));
        assert_eq!(config.user_conflict, Some(UserConflictPolicy::Overwrite));
    }

    #[test]
    fn test_load_empty_config_is_all_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "").unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.database.is_none());
        assert!(config.user_conflict.is_none());
    }

    #[test]
    fn test_invalid_policy_value_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "user_conflict = \"latest\"").unwrap();

        assert!(FileConfig::load(file.path()).is_err());
    }
}
