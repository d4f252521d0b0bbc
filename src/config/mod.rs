//! Configuration module for draftcast.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ArticlePrompts, Prompts, SOURCE_TEXT_VAR};
pub use settings::{
    GeneralSettings, GenerationSettings, OpenAISettings, OutputSettings, PromptSettings,
    ServerSettings, Settings, TranscriptSettings, API_KEY_ENV,
};
