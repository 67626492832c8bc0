//! Client library for the Tautulli API
//!
//! Commands are sent as GET requests against `<base>/api/v2` with the API key,
//! command name, and output format in the query string. Every call takes a
//! [`Context`] that can cancel it or bound it with a deadline.
//!
//! ```no_run
//! use tautulli_client::{Client, Context, NotifyParameters};
//!
//! # async fn run() -> tautulli_client::Result<()> {
//! let client = Client::with_defaults("http://localhost:8181/", "api-key")?;
//! let ctx = Context::background();
//! let params = NotifyParameters::new(1, "Hello", "From Rust");
//! client.notifications().notify(&ctx, &params).await?;
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod client;
pub mod context;
pub mod decode;
pub mod error;
pub mod models;
pub mod notifications;
pub mod params;
pub mod request;
pub mod response;
pub mod server;

// Re-export commonly used types
pub use activity::{Activity, ActivityResponse, Session};
pub use client::{Client, ClientOptions, DEFAULT_USER_AGENT};
pub use context::{Context, ContextError};
pub use decode::{decode, Destination};
pub use error::{ErrorKind, Result, TautulliError};
pub use models::{TautulliResponse, TautulliResponseData};
pub use notifications::{Notifications, NotifyParameters};
pub use params::{encode_parameters, is_zero};
pub use request::{build_command_url, sanitize_url, CommonParameters, DEFAULT_API_PATH};
pub use response::{check_response, AcceptedError, ErrorResponse, FieldError, Response};
pub use server::{Server, ServerIdentity};
