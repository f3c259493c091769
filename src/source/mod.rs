//! Transcript source abstraction.
//!
//! Provides a trait-based interface for caption providers and the resolver
//! that maps user-supplied video references to canonical IDs.

mod reference;
#[cfg(test)]
pub(crate) mod testing;
mod youtube;

pub use reference::ReferenceResolver;
pub use youtube::YoutubeProvider;

use crate::error::Result;
use crate::transcript::{CaptionSegment, CaptionTrackInfo, VideoId};
use async_trait::async_trait;

/// Trait for caption providers.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the caption segments of the best matching track.
    ///
    /// `languages` is a preference list; the first language with a track wins.
    async fn fetch_segments(
        &self,
        video_id: &VideoId,
        languages: &[String],
    ) -> Result<Vec<CaptionSegment>>;

    /// List the caption tracks offered for a video.
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrackInfo>>;

    /// Look up the video title. Best effort: `None` when unavailable.
    async fn fetch_title(&self, video_id: &VideoId) -> Option<String>;
}
