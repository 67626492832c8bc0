//! Error types for the Tautulli request pipeline

use crate::context::ContextError;
use crate::request::sanitize_url;
use crate::response::{AcceptedError, ErrorResponse};
use thiserror::Error;
use url::Url;

/// Result type alias for Tautulli client operations
pub type Result<T> = std::result::Result<T, TautulliError>;

/// Main error type for Tautulli client operations
#[derive(Error, Debug)]
pub enum TautulliError {
    /// Missing, canceled, or expired request context
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Parameter record could not be turned into query pairs
    #[error("Encoding error: {message}")]
    Encoding {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed base URL or client setup
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network failure talking to the server
    #[error("Network error: {message} ({url})")]
    Transport {
        message: String,
        /// Request URL with secrets redacted
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 202 Accepted, the result is not ready yet
    #[error(transparent)]
    Accepted(#[from] AcceptedError),

    /// Non-2xx response with a decoded error body
    #[error(transparent)]
    Response(#[from] ErrorResponse),

    /// Successful response whose JSON body could not be decoded
    #[error("Decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// Tautulli answered with `result` other than `success`
    #[error("Tautulli API error: {message}")]
    Api { message: String },

    /// Writing a raw body into a sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`TautulliError`] for callers that only need to branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be built (encoding, configuration, missing context)
    Invalid,
    /// The context was canceled or a deadline/timeout elapsed
    Canceled,
    /// The server could not be reached or the body could not be read
    Transport,
    /// The server rejected the request (4xx/5xx or an error envelope)
    Rejected,
    /// The server accepted the request but the result is not ready
    Accepted,
    /// The success body was not the expected JSON
    Decode,
}

impl TautulliError {
    /// Create a new encoding error
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new encoding error with source
    pub fn encoding_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Encoding {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Configuration {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error; the URL is sanitized and stripped from the source
    pub fn transport(msg: impl Into<String>, url: &Url, source: reqwest::Error) -> Self {
        Self::Transport {
            message: msg.into(),
            url: sanitize_url(url).to_string(),
            source: source.without_url(),
        }
    }

    /// Create an API envelope error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api {
            message: msg.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Context(ContextError::Missing) => ErrorKind::Invalid,
            Self::Context(_) => ErrorKind::Canceled,
            Self::Encoding { .. } | Self::Configuration { .. } => ErrorKind::Invalid,
            Self::Transport { source, .. } if source.is_timeout() => ErrorKind::Canceled,
            Self::Transport { .. } | Self::Io(_) => ErrorKind::Transport,
            Self::Accepted(_) => ErrorKind::Accepted,
            Self::Response(_) | Self::Api { .. } => ErrorKind::Rejected,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// The accepted payload, if this is a 202 response
    pub fn as_accepted(&self) -> Option<&AcceptedError> {
        match self {
            Self::Accepted(accepted) => Some(accepted),
            _ => None,
        }
    }

    /// The classified error response, if the server rejected the request
    pub fn as_error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Response(response) => Some(response),
            _ => None,
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Accepted(_) => Some(202),
            Self::Response(response) => Some(response.status.as_u16()),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TautulliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode { source: err }
    }
}

impl From<url::ParseError> for TautulliError {
    fn from(err: url::ParseError) -> Self {
        Self::config_with_source("Invalid URL", err)
    }
}
