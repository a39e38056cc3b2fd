//! Application configuration.

use serde::Deserialize;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used as the domain part of actor handles.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Public URL of this instance, used when rendering activities.
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            url: None,
        }
    }
}

impl ServerConfig {
    /// Public base URL, falling back to `https://{name}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.url.as_deref().map_or_else(
            || format!("https://{}", self.name),
            |url| url.trim_end_matches('/').to_string(),
        )
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_server_name() -> String {
    "localServer".to_string()
}

fn default_log_filter() -> String {
    "fedigraph=info".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `FEDIGRAPH_ENV`)
    /// 3. Environment variables with `FEDIGRAPH_` prefix
    pub fn load() -> AppResult<Self> {
        let env = std::env::var("FEDIGRAPH_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FEDIGRAPH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("FEDIGRAPH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    ///
    /// The server name becomes the last segment of `@user@server` handles,
    /// so it must be non-empty and free of `@` and whitespace.
    pub fn validate(&self) -> AppResult<()> {
        let name = &self.server.name;
        if name.is_empty() {
            return Err(AppError::Config("server.name must not be empty".to_string()));
        }
        if name.contains('@') || name.chars().any(char::is_whitespace) {
            return Err(AppError::Config(format!(
                "server.name contains invalid characters: {name:?}"
            )));
        }
        Ok(())
    }
}
