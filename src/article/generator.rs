//! Draft generation through a chat completion provider.

use super::{ArticleDraft, ChatRole, GenerationRequest};
use crate::error::{DraftError, Result};
use crate::openai::create_client_with_timeout;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Hosted language model that turns a request into text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run a single completion and return the generated text.
    async fn complete(&self, request: &GenerationRequest) -> Result<String>;
}

/// OpenAI chat completions.
pub struct OpenAICompletion {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
}

impl OpenAICompletion {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(api_key, timeout)?,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAICompletion {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let messages = request
            .messages()
            .into_iter()
            .map(|m| -> Result<ChatCompletionRequestMessage> {
                Ok(match m.role {
                    ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
                        .content(m.content)
                        .build()
                        .map_err(|e| DraftError::Completion(e.to_string()))?
                        .into(),
                    ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                        .content(m.content)
                        .build()
                        .map_err(|e| DraftError::Completion(e.to_string()))?
                        .into(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .build()
            .map_err(|e| DraftError::Completion(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| DraftError::Completion(e.to_string()))?;

        if let Some(usage) = &response.usage {
            debug!(
                "Completion used {} prompt + {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DraftError::Completion("Empty response from model".to_string()))
    }
}

/// Sends assembled requests to a completion provider.
#[derive(Clone)]
pub struct DraftGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl DraftGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generate a draft with a single attempt. Every failure comes back as
    /// [`DraftError::Completion`].
    #[instrument(skip(self, request), fields(model = %request.model, chars = request.source_text.len()))]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<ArticleDraft> {
        let text = self.provider.complete(request).await.map_err(|e| match e {
            DraftError::Completion(_) => e,
            other => DraftError::Completion(other.to_string()),
        })?;

        if text.trim().is_empty() {
            return Err(DraftError::Completion("Empty response from model".to_string()));
        }

        info!("Draft generated ({} chars)", text.len());
        Ok(ArticleDraft::new(text, request.model.clone()))
    }
}
