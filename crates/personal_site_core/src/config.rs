//! Environment-driven runtime settings.
//!
//! | Variable | Default |
//! |---|---|
//! | `PERSONAL_SITE_DB_PATH` | `<temp dir>/personal_site.sqlite3` |
//! | `PERSONAL_SITE_LOG_LEVEL` | `default_log_level()` |
//! | `PERSONAL_SITE_LOG_DIR` | unset (file logging disabled) |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PERSONAL_SITE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "PERSONAL_SITE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PERSONAL_SITE_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "personal_site.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; `None` keeps logging off.
    pub log_dir: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl SiteConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(|message| {
                ConfigError::InvalidValue {
                    key: LOG_LEVEL_ENV,
                    message,
                }
            })?;
        }
        config.log_dir = read(LOG_DIR_ENV);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SiteConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        SiteConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]).unwrap(), SiteConfig::default());
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = config_from(&[
            (DB_PATH_ENV, " /srv/site.db "),
            (LOG_LEVEL_ENV, "Warning"),
            (LOG_DIR_ENV, "/var/log/site"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/srv/site.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/site"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(DB_PATH_ENV, "   "), (LOG_DIR_ENV, "")]).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = config_from(&[(LOG_LEVEL_ENV, "loud")]).unwrap_err();
        assert!(err.to_string().contains(LOG_LEVEL_ENV));
    }
}
