//! Transcript acquisition for draftcast.
//!
//! A [`TranscriptProvider`] lists the captions available for a video and fetches
//! their fragments. [`fetch_transcript`] picks the best English track and
//! flattens it into a single string.

mod youtube;

pub use youtube::YoutubeTranscriptProvider;

use crate::error::{DraftError, Result};
use crate::source::VideoReference;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// How a caption track was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptKind {
    /// Authored by a person.
    Manual,
    /// Automatic speech recognition.
    Generated,
}

impl std::fmt::Display for TranscriptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptKind::Manual => write!(f, "manual"),
            TranscriptKind::Generated => write!(f, "generated"),
        }
    }
}

/// A caption track offered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTranscript {
    /// Video this track belongs to.
    pub video: VideoReference,
    /// Locale tag, e.g. `en` or `en-GB`.
    pub language_code: String,
    /// Human-readable language name.
    pub language: String,
    pub kind: TranscriptKind,
    /// Provider-specific location of the track contents.
    pub url: String,
}

/// One timed piece of caption text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// A transcript flattened into plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedTranscript {
    pub video: VideoReference,
    pub language_code: String,
    pub kind: TranscriptKind,
    /// Fragment text joined with single spaces, in original order.
    pub text: String,
}

/// External source of captions.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// List every caption track available for a video.
    async fn list_transcripts(&self, video: &VideoReference) -> Result<Vec<AvailableTranscript>>;

    /// Fetch the fragments of one track.
    async fn fetch_fragments(&self, transcript: &AvailableTranscript) -> Result<Vec<TranscriptFragment>>;
}

/// Pick a track: manual captions in locale order first, then generated ones
/// in the same order.
pub fn select_transcript<'a>(
    transcripts: &'a [AvailableTranscript],
    languages: &[String],
) -> Option<&'a AvailableTranscript> {
    [TranscriptKind::Manual, TranscriptKind::Generated]
        .into_iter()
        .find_map(|kind| {
            languages.iter().find_map(|lang| {
                transcripts
                    .iter()
                    .find(|t| t.kind == kind && t.language_code.eq_ignore_ascii_case(lang))
            })
        })
}

/// Join fragment text with single spaces, preserving order.
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fetch the best available transcript for a video as plain text.
#[instrument(skip(provider, languages), fields(provider = provider.name(), video = %video))]
pub async fn fetch_transcript(
    provider: &dyn TranscriptProvider,
    video: &VideoReference,
    languages: &[String],
) -> Result<FetchedTranscript> {
    let available = provider.list_transcripts(video).await?;
    debug!("{} caption tracks available", available.len());

    let selected = select_transcript(&available, languages)
        .ok_or_else(|| DraftError::NoTranscriptAvailable(video.to_string()))?;

    info!(
        "Using {} transcript ({})",
        selected.kind, selected.language_code
    );

    let fragments = provider.fetch_fragments(selected).await?;
    let text = join_fragments(&fragments);

    if text.trim().is_empty() {
        return Err(DraftError::NoTranscriptAvailable(video.to_string()));
    }

    Ok(FetchedTranscript {
        video: video.clone(),
        language_code: selected.language_code.clone(),
        kind: selected.kind,
        text,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory provider for tests.
    pub struct FakeTranscriptProvider {
        pub transcripts: Vec<AvailableTranscript>,
        pub fragments: Vec<TranscriptFragment>,
        pub list_error: Option<fn() -> DraftError>,
        pub fetched: AtomicUsize,
    }

    impl FakeTranscriptProvider {
        pub fn new(tracks: &[(&str, TranscriptKind)], fragments: &[&str]) -> Self {
            let video = VideoReference::parse("abcDEFghi12").unwrap();
            Self {
                transcripts: tracks
                    .iter()
                    .map(|(code, kind)| AvailableTranscript {
                        video: video.clone(),
                        language_code: code.to_string(),
                        language: code.to_string(),
                        kind: *kind,
                        url: format!("fake://{}/{}", code, kind),
                    })
                    .collect(),
                fragments: fragments
                    .iter()
                    .enumerate()
                    .map(|(i, t)| TranscriptFragment::new(*t, i as f64, 1.0))
                    .collect(),
                list_error: None,
                fetched: AtomicUsize::new(0),
            }
        }

        pub fn failing(error: fn() -> DraftError) -> Self {
            let mut provider = Self::new(&[], &[]);
            provider.list_error = Some(error);
            provider
        }
    }

    #[async_trait]
    impl TranscriptProvider for FakeTranscriptProvider {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn list_transcripts(&self, _video: &VideoReference) -> Result<Vec<AvailableTranscript>> {
            match self.list_error {
                Some(make) => Err(make()),
                None => Ok(self.transcripts.clone()),
            }
        }

        async fn fetch_fragments(&self, _transcript: &AvailableTranscript) -> Result<Vec<TranscriptFragment>> {
            self.fetched.fetch_add(1, Ordering::SeqCst);
            Ok(self.fragments.clone())
        }
    }
}
