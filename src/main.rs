//! yt-transcript CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yt_transcript::cli::{commands, Cli, Commands};
use yt_transcript::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(std::path::PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging. Logs go to stderr so stdout stays clean for MCP.
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("yt_transcript={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Mcp => {
            commands::run_mcp(settings).await?;
        }

        Commands::Transcript { video, json } => {
            commands::run_transcript(video, *json, settings).await?;
        }

        Commands::Search {
            video,
            term,
            context,
            json,
        } => {
            commands::run_search(video, term, *context, *json, settings).await?;
        }

        Commands::Section {
            video,
            start,
            end,
            json,
        } => {
            commands::run_section(video, *start, *end, *json, settings).await?;
        }

        Commands::Info { video, json } => {
            commands::run_info(video, *json, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, config_path)?;
        }
    }

    Ok(())
}
