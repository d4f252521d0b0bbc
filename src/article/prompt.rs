//! Prompt assembly.

use crate::config::{Prompts, SOURCE_TEXT_VAR};
use crate::error::{DraftError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// A role-tagged message sent to the completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Everything the completion provider needs for one draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Transcript or pasted notes, exactly as given.
    pub source_text: String,
    /// Editorial instruction sent as the system message.
    pub system_instruction: String,
    /// User message: the user template with the source text substituted.
    pub user_message: String,
    pub model: String,
    pub temperature: f32,
}

impl GenerationRequest {
    /// Messages in the order they are sent.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: ChatRole::System,
                content: self.system_instruction.clone(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: self.user_message.clone(),
            },
        ]
    }
}

/// Wraps source text with the article instruction.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    prompts: Prompts,
    model: String,
    temperature: f32,
}

impl PromptAssembler {
    pub fn new(prompts: Prompts, model: &str, temperature: f32) -> Self {
        Self {
            prompts,
            model: model.to_string(),
            temperature,
        }
    }

    /// Use a different model for subsequent requests.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Use a different temperature for subsequent requests.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// The system instruction with custom variables rendered.
    pub fn system_instruction(&self) -> String {
        self.prompts
            .render_with_custom(&self.prompts.article.system, &HashMap::new())
    }

    /// Build the request for `source_text`.
    pub fn assemble(&self, source_text: &str) -> Result<GenerationRequest> {
        if source_text.trim().is_empty() {
            return Err(DraftError::InvalidInput("source text is empty".to_string()));
        }

        // Custom variables are rendered before the source text goes in, so
        // braces inside a transcript are never treated as placeholders.
        let user_template = self
            .prompts
            .render_with_custom(&self.prompts.article.user, &HashMap::new());
        let user_message =
            user_template.replace(&format!("{{{{{}}}}}", SOURCE_TEXT_VAR), source_text);

        Ok(GenerationRequest {
            source_text: source_text.to_string(),
            system_instruction: self.system_instruction(),
            user_message,
            model: self.model.clone(),
            temperature: self.temperature,
        })
    }
}
