//! Configuration management for the Tautulli client and CLI

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, LogFormat, LoggingSettings, TautulliSettings};
