//! Article drafting.
//!
//! [`PromptAssembler`] wraps source text in the editorial instruction and
//! [`DraftGenerator`] sends it to a completion provider.

mod generator;
mod prompt;

pub use generator::{CompletionProvider, DraftGenerator, OpenAICompletion};
pub use prompt::{ChatMessage, ChatRole, GenerationRequest, PromptAssembler};

#[cfg(test)]
pub(crate) use generator::testing;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default file name for a downloaded draft.
pub const DRAFT_FILE_NAME: &str = "article_draft.md";

/// Markdown produced by the completion provider. Its structure is not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    markdown: String,
    /// Model that produced the draft.
    pub model: String,
}

impl ArticleDraft {
    pub fn new(markdown: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            model: model.into(),
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn into_markdown(self) -> String {
        self.markdown
    }

    /// Write the draft to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.markdown)?;
        Ok(())
    }
}
