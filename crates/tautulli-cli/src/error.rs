//! Application-wide error types using thiserror.

use tautulli_client::{ErrorKind, TautulliError};
use tautulli_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Tautulli request error.
    #[error(transparent)]
    Tautulli(#[from] TautulliError),

    /// Logging setup error.
    #[error("Failed to initialize logging: {0:#}")]
    Logging(anyhow::Error),

    /// Result could not be rendered as JSON.
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error
    ///
    /// 1 invalid input or configuration, 2 transport, 3 canceled or timed out,
    /// 4 rejected by the server, 5 accepted but not ready, 6 undecodable body.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Logging(_) | Self::Io(_) => 1,
            Self::Output(_) => 6,
            Self::Tautulli(err) => match err.kind() {
                ErrorKind::Invalid => 1,
                ErrorKind::Transport => 2,
                ErrorKind::Canceled => 3,
                ErrorKind::Rejected => 4,
                ErrorKind::Accepted => 5,
                ErrorKind::Decode => 6,
            },
        }
    }
}

/// Result type for the command line application.
pub type CliResult<T> = Result<T, CliError>;
