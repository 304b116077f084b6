use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::option::DEFAULT_KEY_SEPARATOR;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to write config: {0}")]
    WriteError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration for PrefGraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PrefGraphConfig {
    /// Hierarchy and key handling
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Separator used when rendering option keys for humans (logs, debugging).
    /// Keys themselves are tagged and never parsed back from this form.
    #[serde(default = "default_key_separator")]
    pub key_separator: String,

    /// Fail index construction on duplicate channel, category or event ids
    /// instead of skipping the later duplicate.
    #[serde(default)]
    pub strict_hierarchy: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            key_separator: default_key_separator(),
            strict_hierarchy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level or EnvFilter directive, e.g. "info" or "prefgraph_core=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "compact"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_key_separator() -> String {
    DEFAULT_KEY_SEPARATOR.to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

const LOG_FORMATS: &[&str] = &["pretty", "compact"];

pub struct ConfigManager {
    config: PrefGraphConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load from `./.prefgraph.toml`, then `~/.prefgraph/config.toml`, then
    /// defaults; environment variables override file values.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, config_path) = Self::load_config_file()?;
        Self::finish(config, config_path)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let config = Self::read_toml_file(path)?;
        Self::finish(config, Some(path.to_path_buf()))
    }

    fn finish(config: PrefGraphConfig, config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = Self::apply_env_overrides(config);
        Self::validate_config(&config)?;

        info!(
            config_file = %config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none (defaults)".to_string()),
            strict_hierarchy = config.engine.strict_hierarchy,
            log_level = %config.logging.level,
            "configuration loaded"
        );

        Ok(Self {
            config,
            config_path,
        })
    }

    fn load_config_file() -> Result<(PrefGraphConfig, Option<PathBuf>), ConfigError> {
        let local_config = Path::new(".prefgraph.toml");
        if local_config.exists() {
            let config = Self::read_toml_file(local_config)?;
            return Ok((config, Some(local_config.to_path_buf())));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".prefgraph").join("config.toml");
            if user_config.exists() {
                let config = Self::read_toml_file(&user_config)?;
                return Ok((config, Some(user_config)));
            }
        }

        Ok((PrefGraphConfig::default(), None))
    }

    fn read_toml_file(path: &Path) -> Result<PrefGraphConfig, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        PrefGraphConfig::from_toml(&content)
    }

    fn apply_env_overrides(mut config: PrefGraphConfig) -> PrefGraphConfig {
        if let Ok(separator) = std::env::var("PREFGRAPH_KEY_SEPARATOR") {
            config.engine.key_separator = separator;
        }
        if let Ok(strict) = std::env::var("PREFGRAPH_STRICT_HIERARCHY") {
            config.engine.strict_hierarchy = strict.to_lowercase() == "true";
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.logging.level = level;
        }
        // more specific than RUST_LOG
        if let Ok(level) = std::env::var("PREFGRAPH_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("PREFGRAPH_LOG_FORMAT") {
            config.logging.format = format;
        }

        config
    }

    fn validate_config(config: &PrefGraphConfig) -> Result<(), ConfigError> {
        if config.engine.key_separator.is_empty() {
            return Err(ConfigError::ValidationError(
                "engine.key_separator must not be empty".to_string(),
            ));
        }
        if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {:?}, got '{}'",
                LOG_FORMATS, config.logging.format
            )));
        }
        if config.logging.level.trim().is_empty() {
            warn!("Empty log level, falling back to 'warn'");
        }
        Ok(())
    }

    pub fn config(&self) -> &PrefGraphConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn into_config(self) -> PrefGraphConfig {
        self.config
    }
}

impl PrefGraphConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}
