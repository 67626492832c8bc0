//! Command line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tautulli_client::NotifyParameters;
use tautulli_config::Config;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "tautulli", author, version, about = "Command line client for the Tautulli API", long_about = None)]
pub struct Cli {
    /// Configuration file path (YAML or TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Tautulli base URL, e.g. http://localhost:8181/
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Tautulli API key
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Ask Tautulli for debug output; `--debug=false` turns it off
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub debug: Option<bool>,

    /// Log level
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Tautulli commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a notification through a notification agent
    Notify(NotifyArgs),

    /// Show current activity
    Activity,

    /// Show the identity of the monitored server
    ServerIdentity,
}

/// Arguments of the notify command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct NotifyArgs {
    /// ID of the notification agent
    #[arg(long)]
    pub notifier_id: i64,

    /// Subject of the message
    #[arg(long)]
    pub subject: String,

    /// Body of the message
    #[arg(long)]
    pub body: String,

    /// JSON headers for webhook agents
    #[arg(long)]
    pub headers: Option<String>,

    /// Arguments for script agents
    #[arg(long, allow_hyphen_values = true)]
    pub script_args: Option<String>,
}

impl Cli {
    /// Layer command line flags over the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.tautulli.url = url.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.tautulli.api_key = api_key.clone();
        }
        if let Some(debug) = self.debug {
            config.tautulli.debug = debug;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(timeout) = self.timeout {
            config.tautulli.timeout_seconds = timeout;
        }
    }
}

impl NotifyArgs {
    /// Request parameters for these arguments
    pub fn to_parameters(&self) -> NotifyParameters {
        let mut params = NotifyParameters::new(self.notifier_id, &self.subject, &self.body);
        if let Some(headers) = &self.headers {
            params = params.with_headers(headers);
        }
        if let Some(script_args) = &self.script_args {
            params = params.with_script_args(script_args);
        }
        params
    }
}
