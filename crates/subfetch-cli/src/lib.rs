//! Subtitle lookup client
//!
//! Library half of the `subfetch` binary. Commands are exposed as plain
//! functions taking a [`SubtitleProvider`] so they can be driven against a
//! mock service.
//!
//! ```text
//! subfetch hash /media/movie.part01.rar --archive
//! subfetch search --path /media/movie.mkv -L en,de
//! subfetch download 4242
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod messages;
pub mod workspace;

pub use cli::{Cli, Commands, LogLevel, OutputFormat};
pub use messages::describe_error;
pub use workspace::{Workspace, WorkspaceError};

use anyhow::{Context, Result};
use subfetch_provider::{OpenSubtitlesClient, ProviderConfig, SubtitleProvider};
use tracing_subscriber::EnvFilter;

/// Install the log subscriber
///
/// An explicit level wins over `RUST_LOG`; without either, `info` is used.
/// Logs go to stderr so command output on stdout stays parseable.
pub fn init_logging(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(tracing::Level::from(level).as_str()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Provider settings from the environment, overridden by global options
pub fn provider_config(cli: &Cli) -> ProviderConfig {
    let mut config = ProviderConfig::from_env();
    if let Some(api_key) = &cli.api_key {
        config = config.with_api_key(api_key.clone());
    }
    if let Some(api_url) = &cli.api_url {
        config = config.with_base_url(api_url.clone());
    }
    config
}

/// Run the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Hash(args) => commands::hash::handle(args, cli.format),
        Commands::Search(args) => {
            let client = connect(&cli)?;
            commands::search::handle(args, cli.format, &client).await
        }
        Commands::Download(args) => {
            let client = connect(&cli)?;
            let profile_dir = cli
                .profile_dir
                .clone()
                .unwrap_or_else(Workspace::default_profile_dir);
            let workspace = Workspace::prepare(&profile_dir).with_context(|| {
                format!("Failed to prepare profile directory {}", profile_dir.display())
            })?;
            commands::download::handle(args, cli.format, &client, &workspace).await
        }
    }
}

fn connect(cli: &Cli) -> Result<impl SubtitleProvider> {
    OpenSubtitlesClient::new(&provider_config(cli)).context("Failed to set up the provider client")
}
