//! Runtime configuration for hosts embedding the data-access layer.
//!
//! Every field is optional in the JSON document:
//!
//! ```json
//! {
//!   "database": { "path": "/var/lib/vehicles.db", "busy_timeout_ms": 2000 },
//!   "logging": { "level": "info", "dir": "/var/log/vehicles" }
//! }
//! ```
//!
//! A missing `database.path` selects a private in-memory database; a missing
//! `logging.dir` leaves logging uninitialized.

use crate::db::DEFAULT_BUSY_TIMEOUT;
use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DalConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT.as_millis() as u64,
        }
    }
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Configured level, or the build-mode default.
    pub fn effective_level(&self) -> &str {
        match self.level.as_deref() {
            Some(level) => level,
            None => default_log_level(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl DalConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DalConfig};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DalConfig::from_json_str("{}").unwrap();
        assert!(config.database.path.is_none());
        assert_eq!(config.database.busy_timeout(), Duration::from_secs(5));
        assert!(config.logging.dir.is_none());
        assert!(!config.logging.effective_level().is_empty());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = DalConfig::from_json_str(
            r#"{"database":{"path":"/tmp/vehicles.db"},"logging":{"level":"warn"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/tmp/vehicles.db"))
        );
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.logging.effective_level(), "warn");
    }

    #[test]
    fn missing_level_falls_back_to_build_default() {
        let config = DalConfig::from_json_str(r#"{"logging":{"dir":"/tmp/logs"}}"#).unwrap();
        assert_eq!(
            config.logging.effective_level(),
            crate::logging::default_log_level()
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = DalConfig::from_json_str("{ database: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dal.json");
        std::fs::write(&path, r#"{"database":{"busy_timeout_ms":250}}"#).unwrap();

        let config = DalConfig::load(&path).unwrap();
        assert_eq!(config.database.busy_timeout(), Duration::from_millis(250));

        let err = DalConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
