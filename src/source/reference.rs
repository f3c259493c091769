//! Video reference resolution.
//!
//! Turns whatever the caller pasted (a bare ID, a watch URL with playlist
//! and timestamp parameters, a short link, an embed or live URL) into the
//! canonical video identifier.

use crate::error::{Result, TranscriptError};
use crate::transcript::VideoId;
use regex::Regex;
use url::Url;

const YOUTUBE_HOSTS: [&str; 6] = [
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

/// Path prefixes whose next segment is the video ID.
const ID_PATH_PREFIXES: [&str; 5] = ["embed", "v", "live", "shorts", "e"];

/// Resolves video URLs and IDs to a canonical [`VideoId`].
pub struct ReferenceResolver {
    id_regex: Regex,
}

impl ReferenceResolver {
    pub fn new() -> Self {
        let id_regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex");
        Self { id_regex }
    }

    /// Resolve a reference, failing with `InvalidReference` when no ID is present.
    pub fn resolve(&self, input: &str) -> Result<VideoId> {
        self.extract_video_id(input)
            .map(VideoId::new_unchecked)
            .ok_or_else(|| {
                TranscriptError::InvalidReference(format!(
                    "no YouTube video ID found in '{}'",
                    input.trim()
                ))
            })
    }

    /// Extract the video ID from a URL or bare ID.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if self.is_video_id(input) {
            return Some(input.to_string());
        }

        let url = parse_url(input)?;
        let host = url.host_str()?.to_ascii_lowercase();

        let candidate = if host == "youtu.be" || host == "www.youtu.be" {
            url.path_segments()?.next().map(str::to_string)
        } else if YOUTUBE_HOSTS.contains(&host.as_str()) || host.ends_with(".youtube.com") {
            Self::id_from_youtube_url(&url)
        } else {
            None
        }?;

        self.is_video_id(&candidate).then_some(candidate)
    }

    fn id_from_youtube_url(url: &Url) -> Option<String> {
        if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
            return Some(v.into_owned());
        }

        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let first = segments.next()?;
        if ID_PATH_PREFIXES.contains(&first) {
            return segments.next().map(str::to_string);
        }
        None
    }

    fn is_video_id(&self, candidate: &str) -> bool {
        self.id_regex.is_match(candidate)
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a URL, allowing the scheme to be omitted.
fn parse_url(input: &str) -> Option<Url> {
    if input.contains("://") {
        return Url::parse(input).ok();
    }
    if input.contains(char::is_whitespace) {
        return None;
    }
    Url::parse(&format!("https://{}", input)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_all_url_forms_resolve_to_same_id() {
        let resolver = ReferenceResolver::new();
        let forms = [
            "dQw4w9WgXcQ",
            "  dQw4w9WgXcQ  ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=4557s",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLbG2RcJqc3nr7Ey0WY4UwFYju3ZhRhhef&index=6",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://music.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=42",
            "youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?start=10",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ];

        for form in forms {
            let id = resolver
                .resolve(form)
                .unwrap_or_else(|e| panic!("{} failed: {}", form, e));
            assert_eq!(id.as_str(), "dQw4w9WgXcQ", "form: {}", form);
        }
    }

    #[test]
    fn test_invalid_references() {
        let resolver = ReferenceResolver::new();
        for input in [
            "not a url",
            "",
            "   ",
            "not-a-video-id",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=short",
            "https://www.youtube.com/playlist?list=PLtest",
            "https://www.youtube.com/@channel",
        ] {
            let err = resolver.resolve(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidReference, "input: {:?}", input);
        }
    }
}
