//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::{Path, PathBuf};
use tautulli_client::TautulliError;
use thiserror::Error;
use tracing::debug;

/// Environment variable pointing at the configuration file
pub const CONFIG_PATH_VAR: &str = "TAUTULLI_CONFIG_PATH";

/// Files looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["tautulli.yaml", "tautulli.yml", "tautulli.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Base URL could not be parsed
    #[error("Invalid Tautulli URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for TautulliError {
    fn from(err: ConfigError) -> Self {
        TautulliError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let mut config = Self::read_file(path.as_ref())?;
        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from the discovered file (or defaults) and the environment
    pub fn load() -> Result<Config, ConfigError> {
        let config = Self::discover(None)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> tautulli_client::Result<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Read configuration and apply environment overrides without validating
    ///
    /// The file is `path` if given, else `$TAUTULLI_CONFIG_PATH`, else the first of
    /// [`DEFAULT_CONFIG_FILES`] that exists. With no file, defaults are used. Callers
    /// that layer more overrides on top validate afterwards.
    pub fn discover(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_VAR).map(PathBuf::from))
            .or_else(|| {
                DEFAULT_CONFIG_FILES
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            });

        let mut config = match path {
            Some(path) => Self::read_file(&path)?,
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };
        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Parse a configuration file, picking the format from its extension
    pub fn read_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        debug!(path = %path.display(), "Reading configuration file");
        match extension.as_deref() {
            None | Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Apply `TAUTULLI_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`, keyed by environment variable name
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Tautulli configuration overrides
        if let Some(url) = lookup("TAUTULLI_URL") {
            config.tautulli.url = url;
        }

        if let Some(api_key) = lookup("TAUTULLI_API_KEY") {
            config.tautulli.api_key = api_key;
        }

        if let Some(api_path) = lookup("TAUTULLI_API_PATH") {
            config.tautulli.api_path = api_path;
        }

        if let Some(timeout) = lookup("TAUTULLI_TIMEOUT") {
            config.tautulli.timeout_seconds = parse_var("TAUTULLI_TIMEOUT", &timeout)?;
        }

        if let Some(debug) = lookup("TAUTULLI_DEBUG") {
            config.tautulli.debug = parse_var("TAUTULLI_DEBUG", &debug)?;
        }

        if let Some(callback) = lookup("TAUTULLI_CALLBACK") {
            config.tautulli.callback = Some(callback);
        }

        if let Some(user_agent) = lookup("TAUTULLI_USER_AGENT") {
            config.tautulli.user_agent = Some(user_agent);
        }

        // Logging configuration overrides
        if let Some(level) = lookup("TAUTULLI_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("TAUTULLI_LOG_FORMAT") {
            config.logging.format = parse_var("TAUTULLI_LOG_FORMAT", &format)?;
        }

        if let Some(file) = lookup("TAUTULLI_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: e.into(),
    })
}
