//! Integration tests for tautulli-cli crate.
//!
//! These parse real argument lists and run commands against a mock server.

use clap::Parser;
use mockito::{Matcher, Server};
use std::io::Write;
use tautulli_cli::{load_config, run, Cli, CliError, Command};
use tautulli_client::Context;
use tautulli_config::Config;

fn config_for(server: &Server) -> Config {
    let mut config = Config::default();
    config.tautulli.url = server.url();
    config.tautulli.api_key = "cli_key".to_string();
    config
}

#[test]
fn test_notify_requires_arguments() {
    assert!(Cli::try_parse_from(["tautulli", "notify", "--subject", "s"]).is_err());
    assert!(Cli::try_parse_from(["tautulli"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["tautulli", "server-identity", "--json", "--debug"]).unwrap();
    assert_eq!(cli.command, Command::ServerIdentity);
    assert!(cli.json);
    assert_eq!(cli.debug, Some(true));
}

#[test]
fn test_load_config_layers_flags_over_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(b"tautulli:\n  url: \"http://file.example.com:8181\"\n  api_key: \"file_key\"\n")
        .unwrap();

    let path = file.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "tautulli",
        "--config",
        path.as_str(),
        "--api-key",
        "flag_key",
        "activity",
    ])
    .unwrap();

    let config = load_config(&cli).unwrap();
    assert_eq!(config.tautulli.api_key, "flag_key");
    assert_eq!(config.tautulli.timeout_seconds, 30);
}

#[test]
fn test_invalid_config_exits_with_one() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(b"tautulli:\n  url: \"http://localhost:8181/\"\n  timeout_seconds: 0\n")
        .unwrap();

    let path = file.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "tautulli",
        "--config",
        path.as_str(),
        "--api-key",
        "k",
        "activity",
    ])
    .unwrap();

    let err = load_config(&cli).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_notify_command_prints_confirmation() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("apikey".into(), "cli_key".into()),
            Matcher::UrlEncoded("cmd".into(), "notify".into()),
            Matcher::UrlEncoded("notifier_id".into(), "4".into()),
            Matcher::UrlEncoded("subject".into(), "Disk".into()),
            Matcher::UrlEncoded("body".into(), "Almost full".into()),
        ]))
        .with_status(200)
        .create_async()
        .await;

    let cli = Cli::try_parse_from([
        "tautulli",
        "notify",
        "--notifier-id",
        "4",
        "--subject",
        "Disk",
        "--body",
        "Almost full",
    ])
    .unwrap();

    let mut out: Vec<u8> = Vec::new();
    run(
        &cli.command,
        &config_for(&server),
        &Context::background(),
        false,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Notification sent to agent 4\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_identity_as_json() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v2")
        .match_query(Matcher::UrlEncoded("cmd".into(), "get_server_identity".into()))
        .with_status(200)
        .with_body(r#"{"response":{"result":"success","data":{"machine_identifier":"m1","version":"1.2.3"}}}"#)
        .create_async()
        .await;

    let mut out: Vec<u8> = Vec::new();
    run(
        &Command::ServerIdentity,
        &config_for(&server),
        &Context::background(),
        true,
        &mut out,
    )
    .await
    .unwrap();

    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed["machine_identifier"], "m1");
    assert_eq!(printed["version"], "1.2.3");
}

#[tokio::test]
async fn test_exit_codes_follow_response_class() {
    let cases = [(400, 4u8), (500, 4), (202, 5)];

    for (status, expected) in cases {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v2")
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body("nope")
            .create_async()
            .await;

        let err = run(
            &Command::Activity,
            &config_for(&server),
            &Context::background(),
            false,
            &mut Vec::<u8>::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.exit_code(), expected, "status {status}");
    }
}

#[tokio::test]
async fn test_undecodable_body_exits_with_six() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v2")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = run(
        &Command::Activity,
        &config_for(&server),
        &Context::background(),
        false,
        &mut Vec::<u8>::new(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), 6);
}

#[tokio::test]
async fn test_canceled_context_exits_with_three() {
    let server = Server::new_async().await;
    let ctx = Context::background();
    ctx.cancel();

    let err = run(
        &Command::Activity,
        &config_for(&server),
        &ctx,
        false,
        &mut Vec::<u8>::new(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), 3);
}
