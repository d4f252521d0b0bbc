//! YouTube caption provider built on `yt-transcript-rs`.

use super::{AvailableTranscript, TranscriptFragment, TranscriptKind, TranscriptProvider};
use crate::error::{DraftError, Result};
use crate::source::VideoReference;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

/// Caption provider backed by YouTube.
pub struct YoutubeTranscriptProvider {
    api: YouTubeTranscriptApi,
    timeout: Duration,
}

impl YoutubeTranscriptProvider {
    /// Create a provider whose calls give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            DraftError::Config(format!("Failed to create YouTube transcript client: {}", e))
        })?;

        Ok(Self { api, timeout })
    }

    async fn with_timeout<T, F>(&self, video: &VideoReference, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, CouldNotRetrieveTranscript>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(|e| map_error(video, e)),
            Err(_) => Err(DraftError::TranscriptProvider(format!(
                "Timed out after {}s waiting for YouTube",
                self.timeout.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptProvider {
    fn name(&self) -> &'static str {
        "youtube"
    }

    #[instrument(skip(self), fields(video = %video))]
    async fn list_transcripts(&self, video: &VideoReference) -> Result<Vec<AvailableTranscript>> {
        let list = self
            .with_timeout(video, self.api.list_transcripts(video.as_str()))
            .await?;

        Ok(list
            .transcripts()
            .map(|t| AvailableTranscript {
                video: video.clone(),
                language_code: t.language_code().to_string(),
                language: t.language().to_string(),
                kind: kind_of(t.is_generated()),
                url: video.watch_url(),
            })
            .collect())
    }

    #[instrument(skip(self, transcript), fields(lang = %transcript.language_code, kind = %transcript.kind))]
    async fn fetch_fragments(&self, transcript: &AvailableTranscript) -> Result<Vec<TranscriptFragment>> {
        let video = &transcript.video;
        debug!("Fetching caption track");

        // Manual tracks win within a language, which is also the selection
        // order, so a single-language request returns the chosen track.
        let fetched = self
            .with_timeout(
                video,
                self.api.fetch_transcript(
                    video.as_str(),
                    &[transcript.language_code.as_str()],
                    false,
                ),
            )
            .await?;

        if kind_of(fetched.is_generated) != transcript.kind {
            warn!(
                "Requested a {} track but YouTube returned a {} one",
                transcript.kind,
                kind_of(fetched.is_generated)
            );
        }

        Ok(fetched
            .snippets
            .into_iter()
            .map(|s| TranscriptFragment::new(s.text, s.start, s.duration))
            .collect())
    }
}

fn kind_of(is_generated: bool) -> TranscriptKind {
    if is_generated {
        TranscriptKind::Generated
    } else {
        TranscriptKind::Manual
    }
}

fn map_error(video: &VideoReference, err: CouldNotRetrieveTranscript) -> DraftError {
    let message = err.to_string();
    classify(video, err.reason.as_ref(), message)
}

/// Sort a crate failure into the stage it belongs to.
fn classify(
    video: &VideoReference,
    reason: Option<&CouldNotRetrieveTranscriptReason>,
    message: String,
) -> DraftError {
    use CouldNotRetrieveTranscriptReason as Reason;

    match reason {
        Some(Reason::VideoUnavailable { .. }) | Some(Reason::InvalidVideoId { .. }) => {
            DraftError::IdentifierInvalid(format!("{}: {}", video, message))
        }
        Some(Reason::TranscriptsDisabled { .. }) | Some(Reason::NoTranscriptFound { .. }) => {
            DraftError::NoTranscriptAvailable(video.to_string())
        }
        _ => DraftError::TranscriptProvider(message),
    }
}
