//! Application configuration structures

use crate::loader::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tautulli_client::{Client, ClientOptions, DEFAULT_API_PATH, DEFAULT_USER_AGENT};
use url::Url;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Tautulli connection settings
    #[validate]
    pub tautulli: TautulliSettings,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// Tautulli API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TautulliSettings {
    /// Tautulli server base URL
    #[validate(url(message = "Tautulli URL must be a valid URL"))]
    pub url: String,

    /// Tautulli API key
    #[validate(length(min = 1, message = "Tautulli API key cannot be empty"))]
    pub api_key: String,

    /// API path relative to the base URL
    #[validate(custom(
        function = "crate::validation::validate_api_path",
        message = "API path must be a relative path without query or fragment"
    ))]
    pub api_path: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// Ask Tautulli for debug output
    pub debug: bool,

    /// Callback token sent with every command
    #[validate(length(min = 1, message = "Callback cannot be empty if specified"))]
    pub callback: Option<String>,

    /// User agent override
    #[validate(length(min = 1, message = "User agent cannot be empty if specified"))]
    pub user_agent: Option<String>,
}

/// Output format for console logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Console output format
    pub format: LogFormat,

    /// Optional log file path
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Log file path contains invalid characters"
    ))]
    pub file: Option<String>,
}

impl Default for TautulliSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8181/".to_string(),
            api_key: String::new(),
            api_path: DEFAULT_API_PATH.to_string(),
            timeout_seconds: 30,
            debug: false,
            callback: None,
            user_agent: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

impl TautulliSettings {
    /// The base URL with a trailing slash, ready for the client
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Client options derived from these settings
    pub fn client_options(&self) -> ClientOptions {
        let mut options = ClientOptions::default()
            .with_api_path(self.api_path.clone())
            .with_debug(self.debug)
            .with_timeout(self.timeout())
            .with_user_agent(
                self.user_agent
                    .clone()
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            );
        if let Some(callback) = &self.callback {
            options = options.with_callback(callback.clone());
        }
        options
    }

    /// Build a client from these settings
    pub fn build_client(&self) -> tautulli_client::Result<Client> {
        let base_url = self.base_url()?;
        Client::new(None, base_url, self.api_key.clone(), self.client_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.tautulli.api_key = "key".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tautulli.url, "http://localhost:8181/");
        assert_eq!(config.tautulli.api_path, "api/v2");
        assert_eq!(config.tautulli.timeout_seconds, 30);
        assert!(!config.tautulli.debug);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_default_requires_api_key() {
        let errors = Config::default().validate_all().unwrap_err();
        assert!(errors.to_string().contains("api_key"));
        assert!(valid_config().validate_all().is_ok());
    }

    #[test]
    fn test_invalid_fields() {
        let mut config = valid_config();
        config.tautulli.url = "not_a_url".to_string();
        assert!(config.validate_all().is_err());

        let mut config = valid_config();
        config.tautulli.timeout_seconds = 0;
        assert!(config.validate_all().is_err());

        let mut config = valid_config();
        config.tautulli.api_path = "/api/v2".to_string();
        assert!(config.validate_all().is_err());

        let mut config = valid_config();
        config.logging.level = "loud".to_string();
        assert!(config.validate_all().is_err());

        let mut config = valid_config();
        config.tautulli.callback = Some(String::new());
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let mut settings = TautulliSettings {
            url: "https://example.com/tautulli".to_string(),
            ..TautulliSettings::default()
        };
        assert_eq!(
            settings.base_url().unwrap().as_str(),
            "https://example.com/tautulli/"
        );

        settings.url = "https://example.com/tautulli/".to_string();
        assert_eq!(
            settings.base_url().unwrap().as_str(),
            "https://example.com/tautulli/"
        );

        settings.url = "http://localhost:8181".to_string();
        assert_eq!(settings.base_url().unwrap().as_str(), "http://localhost:8181/");
    }

    #[test]
    fn test_client_options_from_settings() {
        let settings = TautulliSettings {
            api_path: "custom/api".to_string(),
            timeout_seconds: 5,
            debug: true,
            callback: Some("pong".to_string()),
            ..TautulliSettings::default()
        };
        let options = settings.client_options();
        assert_eq!(options.api_path, "custom/api");
        assert!(options.debug);
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.callback.as_deref(), Some("pong"));
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_build_client() {
        let settings = TautulliSettings {
            url: "http://tautulli.local:8181".to_string(),
            api_key: "key".to_string(),
            ..TautulliSettings::default()
        };
        let client = settings.build_client().unwrap();
        assert_eq!(client.base_url().as_str(), "http://tautulli.local:8181/");
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }
}
