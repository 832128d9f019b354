//! Application configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional TOML file, and `CORKBOARD_`-prefixed environment variables
//! (e.g. `CORKBOARD_SERVER__PORT=8080`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "CORKBOARD";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory served under /static.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7019,
            static_dir: PathBuf::from("crates/corkboard/static"),
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_data_dir().join("corkboard.db"),
        }
    }
}

/// Message-board display settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Site title shown in page headers and feeds.
    pub title: String,
    /// Fully-qualified base URL, used for feed entry ids.
    pub site_url: String,
    /// Messages per page in the full view.
    pub page_size: i64,
    /// Messages per page in the one-line summary view.
    pub one_line_page_size: i64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: "Corkboard".to_string(),
            site_url: "http://localhost:7019".to_string(),
            page_size: 10,
            one_line_page_size: 100,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter (overridden by `RUST_LOG`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Default directory for mutable data (database).
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("corkboard")
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("corkboard")
        .join("config.toml")
}

impl AppConfig {
    /// Load configuration from the given file (optional), with environment
    /// overrides applied on top.
    pub fn load(config_file: &Path) -> Result<Self> {
        let built = Config::builder()
            .add_source(
                File::from(config_file)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("building configuration")?;

        let config: AppConfig = built
            .try_deserialize()
            .context("deserializing configuration")?;

        Ok(config)
    }

    /// Write the default configuration to the given path.
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {parent:?}"))?;
        }

        let rendered =
            toml::to_string_pretty(&AppConfig::default()).context("serializing default config")?;
        fs::write(path, rendered).with_context(|| format!("writing config file {path:?}"))?;

        Ok(())
    }
}
