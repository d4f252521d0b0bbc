//! YouTube URL parsing.

use super::VideoReference;
use regex::Regex;

/// Path segments YouTube uses for pages that are not a single video.
const RESERVED_SEGMENTS: &[&str] = &["videoseries"];

/// Extracts YouTube video IDs from URLs.
pub struct YoutubeSource {
    v_param_regex: Regex,
    path_regex: Regex,
    segment_regex: Regex,
    bare_id_regex: Regex,
}

impl YoutubeSource {
    pub fn new() -> Self {
        // An ID ends at the first character that cannot be part of one.
        let v_param_regex =
            Regex::new(r"[?&]v=([0-9A-Za-z_-]{11})(?:[^0-9A-Za-z_-]|$)").expect("Invalid regex");
        // Everything after the host, up to the query or fragment.
        let path_regex = Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.-]*://)?[^/?#:]+(?::\d+)?(/[^?#]*)")
            .expect("Invalid regex");
        let segment_regex =
            Regex::new(r"^([0-9A-Za-z_-]{11})(?:[^0-9A-Za-z_-]|$)").expect("Invalid regex");
        let bare_id_regex = Regex::new(r"^[0-9A-Za-z_-]{11}$").expect("Invalid regex");

        Self {
            v_param_regex,
            path_regex,
            segment_regex,
            bare_id_regex,
        }
    }

    /// Extract the video ID from a YouTube URL or bare ID.
    ///
    /// A `v=` query parameter wins; otherwise the last path segment is used.
    pub fn extract_video_id(&self, input: &str) -> Option<VideoReference> {
        let input = input.trim();

        if self.bare_id_regex.is_match(input) {
            return VideoReference::parse(input);
        }

        if let Some(caps) = self.v_param_regex.captures(input) {
            return VideoReference::parse(&caps[1]);
        }

        let path = self.path_regex.captures(input)?.get(1)?.as_str();
        let segment = path.split('/').filter(|s| !s.is_empty()).last()?;
        let id = self.segment_regex.captures(segment)?.get(1)?.as_str();

        if RESERVED_SEGMENTS.contains(&id) {
            return None;
        }
        VideoReference::parse(id)
    }
}

impl Default for YoutubeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(input: &str) -> Option<String> {
        YoutubeSource::new()
            .extract_video_id(input)
            .map(|v| v.as_str().to_string())
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=abcDEFghi12"),
            Some("abcDEFghi12".to_string())
        );
        assert_eq!(
            id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_trailing_parameters_ignored() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s&list=PLabc"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://youtu.be/dQw4w9WgXcQ?si=xyz"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ#t=10"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_v_param_with_any_valid_id() {
        for candidate in ["AAAAAAAAAAA", "0123456789_", "-_-_-_-_-_-", "zZ9-_aB3cD4"] {
            let url = format!("https://www.youtube.com/watch?v={}", candidate);
            assert_eq!(id(&url), Some(candidate.to_string()), "{}", url);
        }
    }

    #[test]
    fn test_no_partial_ids() {
        assert_eq!(id("https://www.youtube.com/watch?v=abcDEFghi123"), None);
        assert_eq!(id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(id("https://example.com/a/very-long-path-segment"), None);
        assert_eq!(id("https://www.youtube.com/playlist?list=PLtest"), None);
        assert_eq!(id("not-a-video-id"), None);
        assert_eq!(id(""), None);
    }

    #[test]
    fn test_v_param_beats_path_segments() {
        assert_eq!(
            id("https://example.com/abcdefghijk/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://www.youtube.com/embed/abcdefghijk?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_any_non_id_character_ends_the_id() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ;t=5"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("(see https://www.youtube.com/watch?v=dQw4w9WgXcQ)"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            id("https://youtu.be/dQw4w9WgXcQ)."),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_playlist_pages_have_no_video() {
        assert_eq!(id("https://www.youtube.com/embed/videoseries?list=PLabc"), None);
        assert_eq!(id("https://abcdefghijk"), None);
        assert_eq!(id("/path/to/video.mp4"), None);
    }
}
