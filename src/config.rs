use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::base_filter::DEFAULT_MIN_PLAYS;
use crate::data::loader::resolve_season_file;

/// Environment variable naming a config file to use instead of `dashboard.json`.
pub const CONFIG_ENV: &str = "PASS_DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("min_plays_per_passer must be at least 1")]
    ZeroMinPlays,
}

/// Dashboard settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Season to load on startup.
    pub season: u16,
    /// Directory holding `play_by_play_<season>.*` files.
    pub data_dir: PathBuf,
    /// Explicit file to load, overriding `data_dir` / `season`.
    pub data_file: Option<PathBuf>,
    /// Passers with fewer real pass plays are left out.
    pub min_plays_per_passer: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            season: 2023,
            data_dir: PathBuf::from("data"),
            data_file: None,
            min_plays_per_passer: DEFAULT_MIN_PLAYS,
        }
    }
}

impl DashboardConfig {
    /// Load from `$PASS_DASHBOARD_CONFIG`, else `./dashboard.json` if it exists,
    /// else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => {
                log::info!("No {DEFAULT_CONFIG_FILE} found; using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DashboardConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_plays_per_passer == 0 {
            return Err(ConfigError::ZeroMinPlays);
        }
        Ok(())
    }

    /// File to load on startup.
    pub fn season_file(&self) -> anyhow::Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(resolve_season_file(&self.data_dir, self.season)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "season": 2022 }}"#).unwrap();

        let config = DashboardConfig::from_file(tmp.path()).unwrap();
        assert_eq!(config.season, 2022);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.min_plays_per_passer, DEFAULT_MIN_PLAYS);
    }

    #[test]
    fn zero_threshold_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "min_plays_per_passer": 0 }}"#).unwrap();
        assert!(matches!(
            DashboardConfig::from_file(tmp.path()),
            Err(ConfigError::ZeroMinPlays)
        ));
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "season = 2023").unwrap();
        let err = DashboardConfig::from_file(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&tmp.path().display().to_string()));
    }

    #[test]
    fn explicit_data_file_wins() {
        let config = DashboardConfig {
            data_file: Some(PathBuf::from("custom.csv")),
            ..Default::default()
        };
        assert_eq!(config.season_file().unwrap(), PathBuf::from("custom.csv"));
    }
}
