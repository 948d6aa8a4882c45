//! TOML configuration with environment overrides.
//!
//! # Invariants
//! - A missing config file means defaults, never an error.
//! - `BOOTHTRACK_DATA` wins over `[storage] path`.
//! - `[import] sheet_export_template` must contain `{id}`.

use crate::import::DEFAULT_EXPORT_TEMPLATE;
use log::debug;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "BOOTHTRACK_CONFIG";
pub const DATA_ENV: &str = "BOOTHTRACK_DATA";
const APP_DIR: &str = "boothtrack";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "cannot parse config {}: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Row-oriented tables in one SQLite file.
    #[default]
    Sqlite,
    /// One JSON document per collection in a single file.
    Kv,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    /// File logging is off unless a directory is configured.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub sheet_export_template: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            sheet_export_template: DEFAULT_EXPORT_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub import: ImportConfig,
}

impl AppConfig {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("event=config_load module=config status=default path={}", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        debug!("event=config_load module=config status=ok path={}", path.display());
        Ok(config)
    }

    /// Loads from `--config`, `BOOTHTRACK_CONFIG`, or the per-user data
    /// directory, then applies `BOOTHTRACK_DATA`.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok().filter(|value| !value.trim().is_empty());
        let mut config = match config_path(explicit, env(CONFIG_ENV)) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        if let Some(data) = env(DATA_ENV) {
            config.storage.path = Some(PathBuf::from(data));
        }
        Ok(config)
    }

    /// Storage file in use: configured path, else the per-user default.
    pub fn storage_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.path {
            return path.clone();
        }
        let file = match self.storage.backend {
            StorageBackend::Sqlite => "boothtrack.db",
            StorageBackend::Kv => "boothtrack.json",
        };
        app_data_dir().join(file)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.import.sheet_export_template.contains("{id}") {
            return Err(ConfigError::Invalid(
                "import.sheet_export_template must contain `{id}`".to_string(),
            ));
        }
        Ok(())
    }
}

fn config_path(explicit: Option<&Path>, from_env: Option<String>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| from_env.map(PathBuf::from))
        .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE)))
}

fn app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::{config_path, AppConfig, ConfigError, StorageBackend};
    use std::path::{Path, PathBuf};

    #[test]
    fn empty_file_means_defaults() {
        let config = AppConfig::from_toml_str("", Path::new("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert!(config.import.sheet_export_template.contains("format=tsv"));
    }

    #[test]
    fn sections_parse() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            backend = "kv"
            path = "/tmp/leads.json"

            [logging]
            level = "debug"
            dir = "/tmp/boothtrack-logs"
            "#,
            Path::new("config.toml"),
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Kv);
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/leads.json"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let err = AppConfig::from_toml_str(
            "[import]\nsheet_export_template = \"https://example.com/sheet.tsv\"",
            Path::new("config.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[storage]\nbackend = \"postgres\"", Path::new("c.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn explicit_path_beats_environment() {
        let chosen = config_path(Some(Path::new("/etc/bt.toml")), Some("/env/bt.toml".to_string()));
        assert_eq!(chosen, Some(PathBuf::from("/etc/bt.toml")));
        let chosen = config_path(None, Some("/env/bt.toml".to_string()));
        assert_eq!(chosen, Some(PathBuf::from("/env/bt.toml")));
    }
}
