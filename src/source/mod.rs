//! Video source handling for draftcast.
//!
//! Turns user input (a video URL or a bare ID) into a validated [`VideoReference`].

mod youtube;

pub use youtube::YoutubeSource;

use serde::{Deserialize, Serialize};

/// Length of a YouTube video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// A validated video identifier: exactly 11 characters from `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoReference(String);

impl VideoReference {
    /// Validate a raw identifier.
    pub fn parse(id: &str) -> Option<Self> {
        if Self::is_valid(id) {
            Some(Self(id.to_string()))
        } else {
            None
        }
    }

    /// Check length and charset of an identifier.
    pub fn is_valid(id: &str) -> bool {
        id.len() == VIDEO_ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoReference {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("Invalid video ID: {}", value))
    }
}

impl From<VideoReference> for String {
    fn from(value: VideoReference) -> Self {
        value.0
    }
}

/// Extract a video reference from a URL or bare ID using the default source.
pub fn extract_video_id(input: &str) -> Option<VideoReference> {
    YoutubeSource::new().extract_video_id(input)
}
