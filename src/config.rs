use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "day-night";
const CONFIG_FILE_NAME: &str = "settings.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub log_file: PathBuf,
    /// How long the UI waits for a key press before redrawing
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: "info".to_string(),
            log_file: PathBuf::from("day-night.log"),
            tick_rate_ms: 50,
        }
    }
}

impl Settings {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Apply command line overrides on top of file values
    pub fn with_overrides(mut self, log_level: Option<String>, log_file: Option<PathBuf>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(file) = log_file {
            self.log_file = file;
        }
        self
    }
}

/// Default location of the settings file, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let settings: Settings = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    settings.level_filter()?;

    info!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Load settings from an explicit path, or the default location
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    match explicit {
        Some(path) => load_settings_from(path),
        None => match default_config_path() {
            Some(path) => load_settings_from(&path),
            None => Ok(Settings::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "debug"}}"#).unwrap();

        let settings = load_settings_from(file.path()).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.tick_rate_ms, 50);
        assert_eq!(settings.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        match load_settings_from(file.path()) {
            Err(ConfigError::Parse { .. }) => {}
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "loud"}}"#).unwrap();

        match load_settings_from(file.path()) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "loud"),
            other => panic!("Expected log level error, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_overrides_win() {
        let settings = Settings::default()
            .with_overrides(Some("trace".to_string()), Some(PathBuf::from("/tmp/x.log")));
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.log_file, PathBuf::from("/tmp/x.log"));

        let untouched = Settings::default().with_overrides(None, None);
        assert_eq!(untouched, Settings::default());
    }
}
