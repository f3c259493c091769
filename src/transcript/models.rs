//! Data models for transcripts.

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Wrap an identifier that has already been validated by the resolver.
    pub(crate) fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Watch URL that starts playback at the given second.
    pub fn watch_url(&self, seconds: f64) -> String {
        format!(
            "https://www.youtube.com/watch?v={}&t={}s",
            self.0,
            seconds.max(0.0) as u64
        )
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Raw captions
// ============================================================================

/// One raw caption unit as delivered by a transcript provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Duration in seconds.
    pub duration_seconds: f64,
    /// Caption text, unpunctuated and possibly multi-line.
    pub text: String,
}

impl CaptionSegment {
    pub fn new(start_seconds: f64, duration_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            duration_seconds,
            text: text.into(),
        }
    }

    /// End time in seconds.
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }
}

/// The complete caption track of one video, ordered by start time.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: VideoId,
    pub segments: Vec<CaptionSegment>,
}

impl Transcript {
    /// Create a transcript, clamping negative times and restoring start order.
    pub fn new(video_id: VideoId, mut segments: Vec<CaptionSegment>) -> Self {
        for segment in &mut segments {
            segment.start_seconds = segment.start_seconds.max(0.0);
            segment.duration_seconds = segment.duration_seconds.max(0.0);
        }
        // Stable, so segments sharing a start keep provider order.
        segments.sort_by(|a, b| a.start_seconds.total_cmp(&b.start_seconds));

        Self { video_id, segments }
    }
}

// ============================================================================
// Formatted output
// ============================================================================

/// A readable transcript unit built from one or more caption segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSegment {
    /// Start of the first contributing caption.
    pub timestamp_seconds: f64,
    /// End of the last contributing caption.
    pub end_seconds: f64,
    /// Punctuated, whitespace-normalized text.
    pub text: String,
}

impl FormattedSegment {
    pub fn new(timestamp_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp_seconds,
            end_seconds,
            text: text.into(),
        }
    }

    /// Whether `[timestamp, end)` intersects `[start, end)`.
    ///
    /// A zero-length segment is treated as the point at its timestamp.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        if self.end_seconds <= self.timestamp_seconds {
            return self.timestamp_seconds >= start && self.timestamp_seconds < end;
        }
        self.timestamp_seconds < end && self.end_seconds > start
    }

    /// Render as `[MM:SS] text`.
    pub fn to_line(&self) -> String {
        format!("[{}] {}", format_timestamp(self.timestamp_seconds), self.text)
    }
}

/// A caption track offered for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrackInfo {
    /// BCP-47 style language code, e.g. `en` or `pt-BR`.
    pub language_code: String,
    /// Human-readable language name.
    pub name: String,
    /// True for automatic speech recognition tracks.
    pub is_generated: bool,
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_restores_order() {
        let transcript = Transcript::new(
            VideoId::new_unchecked("dQw4w9WgXcQ"),
            vec![
                CaptionSegment::new(10.0, 2.0, "second"),
                CaptionSegment::new(0.0, 2.0, "first"),
                CaptionSegment::new(10.0, 1.0, "third"),
            ],
        );

        let texts: Vec<_> = transcript.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_transcript_clamps_negative_times() {
        let transcript = Transcript::new(
            VideoId::new_unchecked("dQw4w9WgXcQ"),
            vec![CaptionSegment::new(-1.0, -3.0, "oops")],
        );
        assert_eq!(transcript.segments[0].start_seconds, 0.0);
        assert_eq!(transcript.segments[0].duration_seconds, 0.0);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.4), "01:05");
        assert_eq!(format_timestamp(3665.0), "01:01:05");
    }

    #[test]
    fn test_overlaps() {
        let segment = FormattedSegment::new(5.0, 12.0, "middle");
        assert!(segment.overlaps(4.0, 13.0));
        assert!(segment.overlaps(11.9, 20.0));
        assert!(!segment.overlaps(12.0, 20.0));
        assert!(!segment.overlaps(0.0, 5.0));

        let point = FormattedSegment::new(5.0, 5.0, "[Music]");
        assert!(point.overlaps(5.0, 6.0));
        assert!(!point.overlaps(0.0, 5.0));
    }

    #[test]
    fn test_watch_url() {
        let id = VideoId::new_unchecked("dQw4w9WgXcQ");
        assert_eq!(
            id.watch_url(25.7),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=25s"
        );
    }
}
