//! Error types for draftcast.

use thiserror::Error;

/// Library-level error type for draftcast operations.
#[derive(Error, Debug)]
pub enum DraftError {
    #[error("No video identifier found in: {0}")]
    IdentifierNotFound(String),

    #[error("Video identifier rejected by the transcript provider: {0}")]
    IdentifierInvalid(String),

    #[error("No English transcript available for video {0}")]
    NoTranscriptAvailable(String),

    #[error("Transcript provider error: {0}")]
    TranscriptProvider(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl DraftError {
    /// Stable machine-readable tag for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            DraftError::IdentifierNotFound(_) => "identifier_not_found",
            DraftError::IdentifierInvalid(_) => "identifier_invalid",
            DraftError::NoTranscriptAvailable(_) => "no_transcript_available",
            DraftError::TranscriptProvider(_) => "provider_error",
            DraftError::Completion(_) => "completion_error",
            DraftError::ConfigurationMissing(_) => "configuration_missing",
            DraftError::Config(_) => "config_error",
            DraftError::InvalidInput(_) => "invalid_input",
            DraftError::Io(_) => "io_error",
            DraftError::TomlParse(_) => "toml_error",
            DraftError::Http(_) => "http_error",
        }
    }

    /// A hint telling the user what to do next, if there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DraftError::IdentifierNotFound(_) => Some(
                "Check the URL format, e.g. https://www.youtube.com/watch?v=VIDEO_ID or https://youtu.be/VIDEO_ID",
            ),
            DraftError::IdentifierInvalid(_) => {
                Some("Make sure you passed a single video URL or its 11-character ID.")
            }
            DraftError::NoTranscriptAvailable(_) => Some(
                "Captions are disabled or absent for this video. Copy the transcript manually and use --text or --file.",
            ),
            DraftError::ConfigurationMissing(_) => {
                Some("Set it with: export OPENAI_API_KEY='sk-...' (or [openai] api_key in the config file)")
            }
            DraftError::InvalidInput(_) => Some("Please paste some text first."),
            _ => None,
        }
    }
}

/// Result type alias for draftcast operations.
pub type Result<T> = std::result::Result<T, DraftError>;
