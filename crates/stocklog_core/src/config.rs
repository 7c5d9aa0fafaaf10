//! Runtime configuration.
//!
//! # Responsibility
//! - Read the optional JSON configuration file.
//! - Normalize raw values into typed settings once, at startup.
//!
//! # Invariants
//! - Every field has a default; an empty object is a valid configuration.
//! - `log_dir`, when set, must be absolute (same rule as `init_logging`).

use crate::engine::stats::TOP_N_DEFAULT;
use crate::logging::{default_log_level, normalize_level};
use crate::model::query::{SortKey, SortOrder};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Raw on-disk configuration shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    db_path: Option<PathBuf>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
    top_n: Option<usize>,
    default_sort_by: Option<String>,
    default_sort_order: Option<String>,
    use_demo_data: bool,
}

/// Validated application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file; `None` runs on the demo dataset.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
    pub top_n: usize,
    pub default_sort_by: SortKey,
    pub default_sort_order: SortOrder,
    /// Skip the data source and serve the demo dataset.
    pub use_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
            top_n: TOP_N_DEFAULT,
            default_sort_by: SortKey::Date,
            default_sort_order: SortOrder::Newest,
            use_demo_data: false,
        }
    }
}

impl AppConfig {
    /// Reads and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses and validates JSON config text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let log_level = match raw.log_level.as_deref() {
            Some(level) => normalize_level(level).map_err(ConfigError::Invalid)?,
            None => defaults.log_level,
        };

        if let Some(dir) = raw.log_dir.as_deref() {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }

        let top_n = raw.top_n.unwrap_or(defaults.top_n);
        if top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }

        Ok(Self {
            db_path: raw.db_path,
            log_level,
            log_dir: raw.log_dir,
            top_n,
            default_sort_by: raw
                .default_sort_by
                .as_deref()
                .map_or(defaults.default_sort_by, SortKey::parse),
            default_sort_order: raw
                .default_sort_order
                .as_deref()
                .map_or(defaults.default_sort_order, SortOrder::parse),
            use_demo_data: raw.use_demo_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use crate::model::query::{SortKey, SortOrder};

    #[test]
    fn empty_object_yields_defaults() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn values_are_normalized() {
        let config = AppConfig::from_json_str(
            r#"{"log_level":" WARNING ","default_sort_by":"user","default_sort_order":"oldest","top_n":3}"#,
        )
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_sort_by, SortKey::User);
        assert_eq!(config.default_sort_order, SortOrder::Oldest);
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn relative_log_dir_and_zero_top_n_are_rejected() {
        let err = AppConfig::from_json_str(r#"{"log_dir":"logs"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("absolute")));

        let err = AppConfig::from_json_str(r#"{"top_n":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_fields_are_parse_errors() {
        let err = AppConfig::from_json_str(r#"{"colour":"red"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
