//! Pipeline for draftcast.
//!
//! Runs extract -> fetch -> assemble -> generate, stopping at the first failure.

use crate::article::{
    ArticleDraft, CompletionProvider, DraftGenerator, OpenAICompletion, PromptAssembler,
};
use crate::config::{Prompts, Settings};
use crate::error::{DraftError, Result};
use crate::source::{extract_video_id, VideoReference};
use crate::transcript::{
    fetch_transcript, FetchedTranscript, TranscriptProvider, YoutubeTranscriptProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// What the user handed us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftInput {
    /// A video URL or bare ID.
    Url(String),
    /// Transcript or notes pasted directly.
    Text(String),
}

/// The full transcript-to-article pipeline.
pub struct Pipeline {
    settings: Settings,
    transcripts: Arc<dyn TranscriptProvider>,
    assembler: PromptAssembler,
    generator: DraftGenerator,
}

impl Pipeline {
    /// Build the pipeline with the YouTube and OpenAI providers.
    ///
    /// Fails with [`DraftError::ConfigurationMissing`] when no API key is configured.
    pub fn new(settings: Settings) -> Result<Self> {
        let api_key = settings.api_key()?;

        let transcripts: Arc<dyn TranscriptProvider> = Arc::new(YoutubeTranscriptProvider::new(
            Duration::from_secs(settings.transcript.timeout_secs),
        )?);
        let completion: Arc<dyn CompletionProvider> = Arc::new(OpenAICompletion::new(
            &api_key,
            Duration::from_secs(settings.generation.timeout_secs),
        )?);

        Self::with_components(settings, transcripts, completion)
    }

    /// Build the pipeline with custom providers.
    pub fn with_components(
        settings: Settings,
        transcripts: Arc<dyn TranscriptProvider>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let assembler = PromptAssembler::new(
            prompts,
            &settings.generation.model,
            settings.generation.temperature,
        );

        Ok(Self {
            settings,
            transcripts,
            assembler,
            generator: DraftGenerator::new(completion),
        })
    }

    /// Override the model and temperature from the settings.
    pub fn with_generation(mut self, model: Option<&str>, temperature: Option<f32>) -> Self {
        if let Some(model) = model {
            self.assembler = self.assembler.with_model(model);
        }
        if let Some(temperature) = temperature {
            self.assembler = self.assembler.with_temperature(temperature);
        }
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Extract the video reference from a URL.
    pub fn video_reference(&self, url: &str) -> Result<VideoReference> {
        extract_video_id(url).ok_or_else(|| DraftError::IdentifierNotFound(url.to_string()))
    }

    /// Fetch the transcript for a video URL without generating anything.
    #[instrument(skip(self))]
    pub async fn transcript_from_url(&self, url: &str) -> Result<FetchedTranscript> {
        let video = self.video_reference(url)?;
        info!("Fetching transcript for {}", video);
        fetch_transcript(
            self.transcripts.as_ref(),
            &video,
            &self.settings.transcript.languages,
        )
        .await
    }

    /// Generate a draft from a video URL.
    #[instrument(skip(self))]
    pub async fn draft_from_url(&self, url: &str) -> Result<ArticleDraft> {
        let transcript = self.transcript_from_url(url).await?;
        self.draft_from_text(&transcript.text).await
    }

    /// Generate a draft from pasted text.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn draft_from_text(&self, text: &str) -> Result<ArticleDraft> {
        let request = self.assembler.assemble(text)?;
        self.generator.generate(&request).await
    }

    /// Generate a draft from either kind of input.
    pub async fn draft(&self, input: &DraftInput) -> Result<ArticleDraft> {
        match input {
            DraftInput::Url(url) => self.draft_from_url(url).await,
            DraftInput::Text(text) => self.draft_from_text(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::testing::FakeCompletion;
    use crate::transcript::testing::FakeTranscriptProvider;
    use crate::transcript::TranscriptKind;

    const URL: &str = "https://www.youtube.com/watch?v=abcDEFghi12";

    fn pipeline(
        transcripts: FakeTranscriptProvider,
        completion: Arc<FakeCompletion>,
    ) -> Pipeline {
        Pipeline::with_components(Settings::default(), Arc::new(transcripts), completion).unwrap()
    }

    #[tokio::test]
    async fn test_url_to_draft() {
        let completion = Arc::new(FakeCompletion::ok("# Headline"));
        let pipeline = pipeline(
            FakeTranscriptProvider::new(&[("en", TranscriptKind::Manual)], &["Hello", "world"]),
            completion.clone(),
        );

        let draft = pipeline.draft_from_url(URL).await.unwrap();
        assert_eq!(draft.markdown(), "# Headline");

        let requests = completion.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].source_text, "Hello world");
        assert_eq!(requests[0].system_instruction, Prompts::default().article.system);
    }

    #[tokio::test]
    async fn test_bad_url_short_circuits() {
        let completion = Arc::new(FakeCompletion::ok("unused"));
        let pipeline = pipeline(
            FakeTranscriptProvider::new(&[("en", TranscriptKind::Manual)], &["Hello"]),
            completion.clone(),
        );

        let err = pipeline.draft_from_url("https://example.com/about").await.unwrap_err();
        assert!(matches!(err, DraftError::IdentifierNotFound(_)));
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_transcript_short_circuits() {
        let completion = Arc::new(FakeCompletion::ok("unused"));
        let pipeline = pipeline(FakeTranscriptProvider::new(&[], &[]), completion.clone());

        let err = pipeline.draft_from_url(URL).await.unwrap_err();
        assert!(matches!(err, DraftError::NoTranscriptAvailable(_)));
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_short_circuits() {
        let completion = Arc::new(FakeCompletion::ok("unused"));
        let pipeline = pipeline(
            FakeTranscriptProvider::failing(|| DraftError::TranscriptProvider("timed out".into())),
            completion.clone(),
        );

        let err = pipeline.draft_from_url(URL).await.unwrap_err();
        assert!(matches!(err, DraftError::TranscriptProvider(_)));
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_pasted_text_skips_transcript() {
        let completion = Arc::new(FakeCompletion::ok("# Draft"));
        let transcripts = FakeTranscriptProvider::failing(|| {
            DraftError::TranscriptProvider("should not be called".into())
        });
        let pipeline = pipeline(transcripts, completion.clone());

        let draft = pipeline
            .draft(&DraftInput::Text("Press release: record profits.".to_string()))
            .await
            .unwrap();
        assert_eq!(draft.markdown(), "# Draft");
        assert_eq!(
            completion.requests.lock().unwrap()[0].user_message,
            "Press release: record profits."
        );
    }

    #[tokio::test]
    async fn test_generation_overrides() {
        let completion = Arc::new(FakeCompletion::ok("# Draft"));
        let pipeline = pipeline(FakeTranscriptProvider::new(&[], &[]), completion.clone())
            .with_generation(Some("gpt-4o-mini"), Some(0.3));

        pipeline.draft_from_text("notes").await.unwrap();
        let requests = completion.requests.lock().unwrap();
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert!((requests[0].temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let settings = Settings::default();
        if std::env::var(crate::config::API_KEY_ENV).is_ok() {
            return;
        }
        let err = Pipeline::new(settings).err().unwrap();
        assert!(matches!(err, DraftError::ConfigurationMissing(_)));
    }
}
