//! draftcast CLI entry point.

use anyhow::Result;
use clap::Parser;
use draftcast::cli::commands::{self, DraftOptions};
use draftcast::cli::{Cli, Commands};
use draftcast::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli
        .config
        .as_ref()
        .map(|p| Settings::expand_path(p))
        .unwrap_or_else(Settings::default_config_path);
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("draftcast={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Draft {
            url,
            text,
            file,
            output,
            save,
            model,
            temperature,
        } => {
            let options = DraftOptions {
                url,
                text,
                file,
                output,
                save,
                model,
                temperature,
            };
            commands::run_draft(options, settings).await?;
        }

        Commands::Transcript { url, output } => {
            commands::run_transcript(&url, output, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, port, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings, config_path.clone())?;
        }
    }

    Ok(())
}
