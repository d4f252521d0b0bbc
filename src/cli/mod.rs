//! CLI module for draftcast.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// draftcast - Video Transcript to Article Draft
///
/// Turns a video transcript, fetched from a YouTube URL or pasted manually,
/// into a news-style markdown article draft.
#[derive(Parser, Debug)]
#[command(name = "draftcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an article draft from a video URL or pasted text
    #[command(group(ArgGroup::new("input").required(true).args(["url", "text", "file"])))]
    Draft {
        /// YouTube URL or video ID
        url: Option<String>,

        /// Transcript or notes to use directly instead of fetching a transcript
        #[arg(long)]
        text: Option<String>,

        /// Read the transcript or notes from a file ("-" for stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Write the draft to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the draft as article_draft.md in the current directory
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature
        #[arg(short, long)]
        temperature: Option<f32>,
    },

    /// Fetch and print the transcript of a video without drafting
    Transcript {
        /// YouTube URL or video ID
        url: String,

        /// Write the transcript to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration and prompt templates
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_one_input() {
        assert!(Cli::try_parse_from(["draftcast", "draft"]).is_err());
        assert!(Cli::try_parse_from(["draftcast", "draft", "dQw4w9WgXcQ", "--text", "notes"]).is_err());
    }

    #[test]
    fn test_draft_with_url() {
        let cli = Cli::try_parse_from([
            "draftcast",
            "draft",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "--save",
            "-m",
            "gpt-4o-mini",
        ])
        .unwrap();

        match cli.command {
            Commands::Draft { url, save, model, .. } => {
                assert_eq!(url.as_deref(), Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
                assert!(save);
                assert_eq!(model.as_deref(), Some("gpt-4o-mini"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_save_conflicts_with_output() {
        assert!(Cli::try_parse_from([
            "draftcast", "draft", "--text", "notes", "--save", "-o", "out.md"
        ])
        .is_err());
    }
}
