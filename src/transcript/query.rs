//! Keyword search and time-range extraction over formatted segments.

use super::models::FormattedSegment;
use crate::error::{Result, TranscriptError};
use serde::Serialize;

/// A search hit with its surrounding transcript.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    /// Segment containing the term (or its first half, for split matches).
    pub segment: FormattedSegment,
    /// Following segment when the term only matches across the boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<FormattedSegment>,
    /// Segments starting within the context window before the match.
    pub context_before: Vec<FormattedSegment>,
    /// Segments starting within the context window after the match.
    pub context_after: Vec<FormattedSegment>,
    /// Seconds of transcript actually available before the match, capped by the window.
    pub context_before_seconds: f64,
    /// Seconds of transcript actually available after the match, capped by the window.
    pub context_after_seconds: f64,
}

impl SearchMatch {
    /// Last segment that belongs to the match itself.
    pub fn last_segment(&self) -> &FormattedSegment {
        self.continuation.as_ref().unwrap_or(&self.segment)
    }
}

/// Trim a search term and reject it if nothing is left.
pub fn validate_term(term: &str) -> Result<&str> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(TranscriptError::InvalidInput(
            "search term must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Check `0 <= start < end`; a missing end means "until the end of the video".
pub fn validate_range(start: f64, end: Option<f64>) -> Result<()> {
    if !start.is_finite() || start < 0.0 {
        return Err(TranscriptError::InvalidInput(format!(
            "start_time must be a non-negative number of seconds, got {}",
            start
        )));
    }
    if let Some(end) = end {
        if !end.is_finite() || end <= start {
            return Err(TranscriptError::InvalidInput(format!(
                "end_time ({}) must be greater than start_time ({})",
                end, start
            )));
        }
    }
    Ok(())
}

/// Case-insensitive literal search in chronological order.
///
/// Segments are matched individually first. Only when nothing matches are
/// adjacent pairs tried, so phrases split by the formatter are still found.
pub fn search(segments: &[FormattedSegment], term: &str, context_seconds: f64) -> Vec<SearchMatch> {
    let needle = term.to_lowercase();

    let mut hits: Vec<(usize, Option<usize>)> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.text.to_lowercase().contains(&needle))
        .map(|(i, _)| (i, None))
        .collect();

    if hits.is_empty() {
        let mut i = 0;
        while i + 1 < segments.len() {
            let joined = format!(
                "{} {}",
                segments[i].text.trim_end_matches(['.', '!', '?', '…']),
                segments[i + 1].text
            )
            .to_lowercase();
            if joined.contains(&needle) {
                hits.push((i, Some(i + 1)));
                i += 2;
            } else {
                i += 1;
            }
        }
    }

    let window = context_seconds.max(0.0);
    let video_end = segments.last().map_or(0.0, |s| s.timestamp_seconds);

    hits.into_iter()
        .map(|(first, second)| {
            let last = second.unwrap_or(first);
            let mut hit = SearchMatch {
                segment: segments[first].clone(),
                continuation: second.map(|j| segments[j].clone()),
                context_before: context_before(segments, first, window),
                context_after: context_after(segments, last, window),
                context_before_seconds: 0.0,
                context_after_seconds: 0.0,
            };
            // Measured from the start of the video and the last caption.
            hit.context_before_seconds = hit.segment.timestamp_seconds.min(window);
            hit.context_after_seconds =
                (video_end - hit.last_segment().timestamp_seconds).clamp(0.0, window);
            hit
        })
        .collect()
}

fn context_before(segments: &[FormattedSegment], index: usize, window: f64) -> Vec<FormattedSegment> {
    if window <= 0.0 {
        return Vec::new();
    }
    let anchor = segments[index].timestamp_seconds;
    segments[..index]
        .iter()
        .filter(|s| s.timestamp_seconds >= anchor - window)
        .cloned()
        .collect()
}

fn context_after(segments: &[FormattedSegment], index: usize, window: f64) -> Vec<FormattedSegment> {
    if window <= 0.0 {
        return Vec::new();
    }
    let anchor = segments[index].timestamp_seconds;
    segments[index + 1..]
        .iter()
        .take_while(|s| s.timestamp_seconds <= anchor + window)
        .cloned()
        .collect()
}

/// Segments overlapping `[start, end)`, in order.
pub fn extract_range(segments: &[FormattedSegment], start: f64, end: Option<f64>) -> Vec<FormattedSegment> {
    let end = end.unwrap_or(f64::INFINITY);
    segments
        .iter()
        .filter(|s| s.overlaps(start, end))
        .cloned()
        .collect()
}
