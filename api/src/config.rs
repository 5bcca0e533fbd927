//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then the optional
//! YAML file, then `APP__`-prefixed environment variables. The database
//! password only ever comes from `DB_PASSWORD`.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use video_catalog_core::connection::DbConfig;

/// Config file used when `APP_CONFIG` is unset; any supported extension works
const DEFAULT_CONFIG_PATH: &str = "configs/config";
const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub db: DbConfig,
    pub storage: StorageBackend,
    #[serde(default)]
    pub log: LogConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where videos are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Log sink settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Also write daily-rotated log files into this directory
    pub dir: Option<String>,
    /// File name prefix, e.g. `video` gives `video.2024-01-31.log`
    pub prefix: String,
    /// Rotated files kept before the oldest is removed
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            prefix: "video".to_string(),
            max_files: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and the process environment
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("APP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = Self::load_from(&path, env_source())?;
        config.db.password = std::env::var("DB_PASSWORD").ok();
        Ok(config)
    }

    fn load_from(path: &str, env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("db.dbname", "videos")?
            .set_default("db.host", "localhost")?
            .set_default("db.port", 5432)?
            .set_default("db.username", "postgres")?
            .set_default("db.sslmode", "disable")?
            .set_default("db.max_connections", 5)?
            .set_default("storage", "postgres")?
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        env_source().source(Some(map))
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::load_from("does/not/exist", env_with(&[])).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.db.dbname, "videos");
        assert_eq!(config.db.port, 5432);
        assert_eq!(config.db.sslmode, "disable");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert!(config.db.password.is_none());
        assert!(config.log.dir.is_none());
        assert_eq!(config.log.prefix, "video");
        assert_eq!(config.log.max_files, 5);
    }

    #[test]
    fn test_config_file_and_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "db:\n  dbname: catalog\n  host: db.internal\n  port: 6543\n  username: app\n  sslmode: require\nlog:\n  dir: ./logs\n  max_files: 10"
        )
        .unwrap();

        let config = AppConfig::load_from(
            path.to_str().unwrap(),
            env_with(&[("APP__SERVER__PORT", "9090"), ("APP__STORAGE", "memory")]),
        )
        .unwrap();

        assert_eq!(config.db.dbname, "catalog");
        assert_eq!(config.db.host, "db.internal");
        assert_eq!(config.db.port, 6543);
        assert_eq!(config.db.sslmode, "require");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.log.dir.as_deref(), Some("./logs"));
        assert_eq!(config.log.max_files, 10);
        assert_eq!(config.log.prefix, "video");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = AppConfig::load_from(
            "does/not/exist",
            env_with(&[("APP__SERVER__PORT", "not-a-port")]),
        );
        assert!(result.is_err());
    }
}
