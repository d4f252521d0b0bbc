//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::DraftError;
use crate::source::extract_video_id;
use crate::transcript::{fetch_transcript, YoutubeTranscriptProvider};
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Run the transcript command.
pub async fn run_transcript(url: &str, output: Option<PathBuf>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcript, &settings) {
        Output::fail(&e)
    }

    let video = match extract_video_id(url) {
        Some(video) => video,
        None => {
            let e = DraftError::IdentifierNotFound(url.to_string());
            Output::fail(&e)
        }
    };

    let provider =
        YoutubeTranscriptProvider::new(Duration::from_secs(settings.transcript.timeout_secs))?;

    let spinner = Output::spinner("Fetching transcript...");
    let transcript =
        match fetch_transcript(&provider, &video, &settings.transcript.languages).await {
            Ok(t) => {
                spinner.finish_and_clear();
                t
            }
            Err(e) => {
                spinner.finish_and_clear();
                Output::fail(&e)
            }
        };

    match output {
        Some(path) => {
            std::fs::write(&path, &transcript.text)?;
            Output::success(&format!(
                "Saved {} transcript ({}) to {}",
                transcript.kind,
                transcript.language_code,
                path.display()
            ));
        }
        None => println!("{}", transcript.text),
    }

    Ok(())
}
