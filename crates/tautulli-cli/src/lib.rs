//! Command line client for the Tautulli API
//!
//! The `tautulli` binary is a thin layer over [`tautulli_client`]: it resolves
//! configuration, sets up logging, and runs one command under a cancelable context.

pub mod cli;
pub mod error;
pub mod logging;
pub mod run;

pub use cli::{Cli, Command, NotifyArgs};
pub use error::{CliError, CliResult};
pub use logging::{init_logging, LoggingConfig};
pub use run::{load_config, run};
