//! Command execution

use crate::cli::{Cli, Command};
use crate::error::CliResult;
use serde_json::to_string_pretty;
use std::io::Write;
use tautulli_client::{ActivityResponse, Context, ServerIdentity};
use tautulli_config::{Config, ConfigError, ConfigLoader};
use tracing::{debug, info};

/// Resolve configuration: file, then environment, then command line flags
pub fn load_config(cli: &Cli) -> CliResult<Config> {
    let mut config = ConfigLoader::discover(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate_all().map_err(ConfigError::from)?;
    Ok(config)
}

/// Run one command and write its result to `out`
pub async fn run<W: Write>(
    command: &Command,
    config: &Config,
    ctx: &Context,
    json: bool,
    out: &mut W,
) -> CliResult<()> {
    let client = config.tautulli.build_client()?;
    debug!(?client, "Client ready");

    match command {
        Command::Notify(args) => {
            let notifier_id = args.notifier_id;
            let params = args.to_parameters();
            let mut response = client.notifications().notify(ctx, &params).await?;
            response.close();
            info!(notifier_id, "Notification delivered");
            if json {
                writeln!(
                    out,
                    "{}",
                    serde_json::json!({ "notifier_id": notifier_id, "status": response.status().as_u16() })
                )?;
            } else {
                writeln!(out, "Notification sent to agent {notifier_id}")?;
            }
        }
        Command::Activity => {
            let activity = client.activity().get_activity(ctx).await?;
            if json {
                writeln!(out, "{}", to_string_pretty(&activity)?)?;
            } else {
                write_activity(out, &activity)?;
            }
        }
        Command::ServerIdentity => {
            let identity = client.server().get_server_identity(ctx).await?;
            if json {
                writeln!(out, "{}", to_string_pretty(&identity)?)?;
            } else {
                write_identity(out, &identity)?;
            }
        }
    }
    Ok(())
}

fn write_activity<W: Write>(out: &mut W, activity: &ActivityResponse) -> std::io::Result<()> {
    let count = |value: Option<i64>| value.unwrap_or(0);
    writeln!(
        out,
        "Streams: {} (direct play {}, direct stream {}, transcode {})",
        count(activity.stream_count),
        count(activity.stream_count_direct_play),
        count(activity.stream_count_direct_stream),
        count(activity.stream_count_transcode),
    )?;
    writeln!(out, "Bandwidth: {} kbps", count(activity.total_bandwidth))?;

    for session in &activity.sessions {
        let user = session
            .friendly_name
            .as_deref()
            .or(session.user.as_deref())
            .unwrap_or("unknown");
        let title = session
            .full_title
            .as_deref()
            .or(session.title.as_deref())
            .unwrap_or("unknown");
        let state = session.state.as_deref().unwrap_or("unknown");
        writeln!(
            out,
            "  {user}: {title} [{state}, {}%]",
            count(session.progress_percent)
        )?;
    }
    Ok(())
}

fn write_identity<W: Write>(out: &mut W, identity: &ServerIdentity) -> std::io::Result<()> {
    writeln!(
        out,
        "Machine identifier: {}",
        identity.machine_identifier.as_deref().unwrap_or("unknown")
    )?;
    writeln!(out, "Version: {}", identity.version.as_deref().unwrap_or("unknown"))
}
