//! Pre-flight checks before network calls.
//!
//! Validates that required configuration is present before a command starts,
//! so a missing key halts the process instead of failing midway.

use crate::config::{Prompts, Settings};
use crate::error::{DraftError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Drafting needs an API key and loadable prompts.
    Draft,
    /// Transcript fetching has no configuration requirements.
    Transcript,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Draft => {
            settings.api_key()?;
            check_prompts(settings)?;
        }
        Operation::Transcript => {}
    }
    check_languages(settings)
}

fn check_prompts(settings: &Settings) -> Result<()> {
    Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )
    .map(|_| ())
}

fn check_languages(settings: &Settings) -> Result<()> {
    if settings.transcript.languages.is_empty() {
        return Err(DraftError::Config(
            "transcript.languages must list at least one locale".to_string(),
        ));
    }
    Ok(())
}
