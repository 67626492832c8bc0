//! Main entry point for the tautulli command line client.

use clap::Parser;
use std::process::ExitCode;
use tautulli_cli::{init_logging, load_config, run, Cli, CliError, LoggingConfig};
use tautulli_client::Context;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    // Held until exit so buffered file logs are flushed
    let _guard = match init_logging(&LoggingConfig::from(&config.logging)) {
        Ok(guard) => guard,
        Err(e) => return fail(&CliError::Logging(e)),
    };

    info!("Configuration loaded successfully");

    let ctx = Context::background();
    let shutdown = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, canceling request");
            shutdown.cancel();
        }
    });

    let mut stdout = std::io::stdout().lock();
    match run(&cli.command, &config, &ctx, cli.json, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            fail(&e)
        }
    }
}

fn fail(err: &CliError) -> ExitCode {
    eprintln!("Error: {err}");
    ExitCode::from(err.exit_code())
}
