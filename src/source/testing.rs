//! In-memory provider for unit tests.

use super::TranscriptProvider;
use crate::error::{ErrorKind, Result, TranscriptError};
use crate::transcript::{CaptionSegment, CaptionTrackInfo, VideoId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Returns canned segments or a canned failure, optionally after a delay.
pub struct FakeProvider {
    pub segments: Vec<CaptionSegment>,
    pub failure: Option<ErrorKind>,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn with_segments(segments: Vec<CaptionSegment>) -> Self {
        Self {
            segments,
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            failure: Some(kind),
            ..Self::with_segments(Vec::new())
        }
    }

    fn error(&self) -> Option<TranscriptError> {
        self.failure.map(|kind| match kind {
            ErrorKind::VideoNotFound => TranscriptError::VideoNotFound("gone".into()),
            ErrorKind::TranscriptsDisabled => TranscriptError::TranscriptsDisabled("off".into()),
            ErrorKind::ProviderUnavailable => TranscriptError::ProviderUnavailable("down".into()),
            _ => TranscriptError::Unknown("boom".into()),
        })
    }
}

#[async_trait]
impl TranscriptProvider for FakeProvider {
    async fn fetch_segments(
        &self,
        _video_id: &VideoId,
        _languages: &[String],
    ) -> Result<Vec<CaptionSegment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.error() {
            Some(e) => Err(e),
            None => Ok(self.segments.clone()),
        }
    }

    async fn list_tracks(&self, _video_id: &VideoId) -> Result<Vec<CaptionTrackInfo>> {
        match self.error() {
            Some(e) => Err(e),
            None => Ok(vec![CaptionTrackInfo {
                language_code: "en".to_string(),
                name: "English".to_string(),
                is_generated: true,
            }]),
        }
    }

    async fn fetch_title(&self, _video_id: &VideoId) -> Option<String> {
        Some("Test Video".to_string())
    }
}
