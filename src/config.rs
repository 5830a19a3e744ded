//! Configuration for reaction logging.
//!
//! Supports YAML file and environment variable overrides.

use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "REACTION_CONFIG";

/// Reaction logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backing store identification.
    pub store: StoreConfig,
    /// Log sink selection and filtering.
    pub logging: LoggingConfig,
}

/// Store configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store identifier bound into every log record (e.g., "mongo").
    pub name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "memory".to_string(),
        }
    }
}

/// Log sink discriminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkType {
    /// Emit records as `tracing` events.
    #[default]
    Tracing,
    /// Write logfmt lines straight to stdout.
    Stdout,
}

impl std::str::FromStr for SinkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tracing" => Ok(SinkType::Tracing),
            "stdout" => Ok(SinkType::Stdout),
            other => Err(ConfigError::Parse(format!("unknown log sink: {other}"))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Where records go.
    pub sink: SinkType,
    /// `tracing-subscriber` filter directive used when `REACTION_LOG` is unset
    /// or invalid; the environment variable itself is read at bootstrap.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            sink: SinkType::Tracing,
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(name) = std::env::var("REACTION_STORE") {
            self.store.name = name;
        }

        if let Ok(sink) = std::env::var("REACTION_LOG_SINK") {
            self.logging.sink = sink.parse()?;
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
