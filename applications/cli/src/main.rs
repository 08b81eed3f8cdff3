/// tunesync - sync a local music collection with a cloud music library
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tunesync_cli::{
    cli::{Cli, Command, CommonArgs},
    sync::{sync_down, sync_up},
    AppConfig,
};
use tunesync_client::{authenticate, ClientConfig, CredentialStore, TuneSyncClient};
use tunesync_local::{normalize_path, PathTemplate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let command = Cli::parse().into_command();
    init_tracing(command.common());

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(common: &CommonArgs) {
    let default_filter = match (common.quiet, common.log) {
        (true, _) => "tunesync=warn",
        (false, true) => "tunesync=info,tunesync_client=debug",
        (false, false) => "tunesync=info",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(command: Command) -> anyhow::Result<()> {
    let common = command.common();
    let cwd = std::env::current_dir().context("Cannot determine working directory")?;

    let mut config = AppConfig::load(common.config.as_deref())?;
    common.apply_to(&mut config);
    config.validate()?;

    // Malformed filters must fail before anything touches the account
    let options = common
        .sync_options(&config, &cwd)
        .context("Invalid sync options")?;
    let ctx = common.run_context();

    let client = TuneSyncClient::new(ClientConfig::new(config.server.url.clone()))?;
    let store = CredentialStore::default_location()?;
    authenticate(&client, &store, &common.cred, config.login())
        .await
        .context("Authentication failed")?;

    match &command {
        Command::Up(args) => {
            let inputs: Vec<PathBuf> = if args.input.is_empty() {
                vec![cwd.clone()]
            } else {
                args
                    .input
                    .iter()
                    .map(|input| normalize_path(&cwd.join(input)))
                    .collect()
            };

            let summary = sync_up(&client, &inputs, &options, ctx).await?;
            tracing::info!(
                uploaded = summary.uploaded,
                failed = summary.failed,
                deleted = summary.deleted,
                "Upload finished"
            );
        }
        Command::Down(args) => {
            let template = args
                .output
                .clone()
                .unwrap_or_else(|| cwd.display().to_string());
            let output = PathTemplate::parse(&template, &cwd);

            let summary = sync_down(&client, &output, &options, ctx).await?;
            tracing::info!(
                downloaded = summary.downloaded,
                failed = summary.failed,
                removed = summary.removed.len(),
                playlists = summary.playlists.len(),
                "Download finished"
            );
        }
    }

    client.logout().await;
    tracing::info!("All done!");

    Ok(())
}
