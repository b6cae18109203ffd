//! Configuration loading: optional TOML file, then environment overrides.
//!
//! Precedence, lowest to highest: built-in defaults, `kinolog.toml` (or the
//! file named by `KINOLOG_CONFIG`), `KINOLOG_*` environment variables, CLI
//! flags (applied by `main`). A `.env` file is honored before the
//! environment is read.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use kinolog_core::{CoercionMode, IngestOptions};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8420,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// The outline document the catalog is built from.
    pub path: PathBuf,
    /// Rebuild the snapshot when the document changes on disk.
    pub watch: bool,
    /// Abort ingestion on the first uncoercible property value instead of
    /// dropping the field.
    pub strict_fields: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            path: PathBuf::from("movies.org"),
            watch: true,
            strict_fields: false,
        }
    }
}

impl CatalogConfig {
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            mode: if self.strict_fields {
                CoercionMode::Strict
            } else {
                CoercionMode::Lenient
            },
        }
    }
}

/// File + environment loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        ConfigLoader::default()
    }

    /// Pin the config file instead of consulting `KINOLOG_CONFIG`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        ConfigLoader {
            path: Some(path.into()),
        }
    }

    pub fn load(self) -> Result<Config, ConfigError> {
        // A missing .env is fine; a present one feeds the overrides below.
        dotenvy::dotenv().ok();

        let path = self
            .path
            .or_else(|| std::env::var_os("KINOLOG_CONFIG").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("kinolog.toml"));

        let mut config = if path.exists() {
            Self::read_file(&path)?
        } else {
            Config::default()
        };
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env_overrides(config: &mut Config) {
        if let Some(path) = std::env::var_os("KINOLOG_CATALOG") {
            config.catalog.path = PathBuf::from(path);
        }
        if let Ok(host) = std::env::var("KINOLOG_HOST") {
            config.server.host = host;
        }
        if let Ok(raw) = std::env::var("KINOLOG_PORT") {
            match raw.parse() {
                Ok(port) => config.server.port = port,
                Err(_) => warn!(value = raw, "ignoring unparseable KINOLOG_PORT"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_a_file() {
        let config = Config::default();
        assert_eq!(config.server.port, 8420);
        assert_eq!(config.catalog.path, PathBuf::from("movies.org"));
        assert!(config.catalog.watch);
        assert!(!config.catalog.strict_fields);
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[server]\nport = 9000\n\n[catalog]\npath = \"archive.org\"\nstrict_fields = true\n"
        )
        .unwrap();

        let config = ConfigLoader::with_path(file.path()).load().unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.catalog.path, PathBuf::from("archive.org"));
        assert!(config.catalog.strict_fields);
        // Unset keys keep their defaults.
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server]\nprot = 9000\n").unwrap();
        assert!(matches!(
            ConfigLoader::with_path(file.path()).load(),
            Err(ConfigError::Parse { .. })
        ));
    }
}
