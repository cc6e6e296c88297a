use clap::ArgMatches;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::error::ClimateError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: SqliteConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,             // actix worker threads
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    pub database_path: String,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,              // env_logger filter, RUST_LOG wins
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            workers: 2,
        }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: "Resources/hawaii.sqlite".to_string(),
            max_connections: 5,
            connection_timeout_seconds: 30,
            busy_timeout_ms: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load defaults, then the TOML file named by `--config` (if any), then the
    /// remaining command line overrides.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, ClimateError> {
        let mut config = match matches.get_one::<String>("config") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_matches(matches)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_matches(&mut self, matches: &ArgMatches) -> Result<(), ClimateError> {
        if let Some(path) = matches.get_one::<String>("database") {
            self.database.database_path = path.clone();
        }

        if let Some(host) = matches.get_one::<String>("host") {
            self.server.host = host.clone();
        }

        if let Some(port) = matches.get_one::<String>("port") {
            self.server.port = port
                .parse()
                .map_err(|_| ClimateError::ConfigError(format!("Invalid port: {}", port)))?;
        }

        if let Some(level) = matches.get_one::<String>("log-level") {
            self.logging.level = level.clone();
        }

        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClimateError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClimateError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ClimateError> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;

        info!("💾 Configuration written to {}", path.as_ref().display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ClimateError> {
        if self.database.database_path.trim().is_empty() {
            return Err(ClimateError::ConfigError("database.database_path must not be empty".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ClimateError::ConfigError("database.max_connections must be at least 1".to_string()));
        }

        if self.server.port == 0 {
            return Err(ClimateError::ConfigError("server.port must not be 0".to_string()));
        }

        if self.server.workers == 0 {
            return Err(ClimateError::ConfigError("server.workers must be at least 1".to_string()));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
