//! Draft command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{DraftInput, Pipeline};
use anyhow::Result;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Options for the draft command.
#[derive(Debug, Default)]
pub struct DraftOptions {
    pub url: Option<String>,
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub save: bool,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Run the draft command.
pub async fn run_draft(options: DraftOptions, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Draft, &settings) {
        Output::failure(&e);
        Output::info("Run 'draftcast doctor' for detailed diagnostics.");
        std::process::exit(1);
    }

    let input = resolve_input(&options)?;
    let save_path = options
        .output
        .clone()
        .or_else(|| options.save.then(|| PathBuf::from(&settings.output.file_name)));

    let pipeline = match Pipeline::new(settings) {
        Ok(pipeline) => pipeline.with_generation(options.model.as_deref(), options.temperature),
        Err(e) => Output::fail(&e),
    };

    let source_text = match &input {
        DraftInput::Text(text) => text.clone(),
        DraftInput::Url(url) => {
            let spinner = Output::spinner("Fetching transcript...");
            match pipeline.transcript_from_url(url).await {
                Ok(transcript) => {
                    spinner.finish_and_clear();
                    Output::info(&format!(
                        "Fetched {} transcript ({}) for {}",
                        transcript.kind, transcript.language_code, transcript.video
                    ));
                    transcript.text
                }
                Err(e) => {
                    spinner.finish_and_clear();
                    Output::fail(&e)
                }
            }
        }
    };

    let spinner = Output::spinner("Drafting article...");
    let draft = match pipeline.draft_from_text(&source_text).await {
        Ok(draft) => {
            spinner.finish_and_clear();
            draft
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::fail(&e)
        }
    };

    match save_path {
        Some(path) => {
            draft.save_to(&path)?;
            Output::success(&format!("Draft saved to {}", path.display()));
        }
        None => {
            Output::success("Draft ready!");
            println!("{}", draft.markdown());
        }
    }

    Ok(())
}

/// Turn the mutually exclusive input flags into a pipeline input.
fn resolve_input(options: &DraftOptions) -> Result<DraftInput> {
    if let Some(url) = &options.url {
        return Ok(DraftInput::Url(url.clone()));
    }
    if let Some(text) = &options.text {
        return Ok(DraftInput::Text(text.clone()));
    }
    if let Some(path) = &options.file {
        return Ok(DraftInput::Text(read_source(path)?));
    }
    anyhow::bail!("Provide a video URL, --text or --file")
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
