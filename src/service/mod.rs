//! Transcript query service.
//!
//! Coordinates the request pipeline: resolve the video reference, fetch the
//! captions, format them, and answer the query. Every call is independent;
//! nothing is cached between calls.

mod render;

use crate::config::Settings;
use crate::error::{Result, TranscriptError};
use crate::source::{ReferenceResolver, TranscriptProvider, YoutubeProvider};
use crate::transcript::query::{self, SearchMatch};
use crate::transcript::{CaptionTrackInfo, FormattedSegment, Formatter, Transcript, VideoId};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// The complete formatted transcript of a video.
#[derive(Debug, Clone, Serialize)]
pub struct FullTranscript {
    pub video_id: VideoId,
    pub segments: Vec<FormattedSegment>,
}

/// Outcome of a keyword search. An empty `matches` list is a valid result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub video_id: VideoId,
    pub title: String,
    pub term: String,
    pub context_seconds: f64,
    pub matches: Vec<SearchMatch>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Outcome of a time-range extraction. An empty `segments` list is a valid result.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptSection {
    pub video_id: VideoId,
    pub title: String,
    pub start_seconds: f64,
    /// `None` means the section runs to the end of the video.
    pub end_seconds: Option<f64>,
    pub segments: Vec<FormattedSegment>,
}

impl TranscriptSection {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Title and caption tracks of a video.
#[derive(Debug, Clone, Serialize)]
pub struct VideoInfo {
    pub video_id: VideoId,
    pub title: String,
    pub tracks: Vec<CaptionTrackInfo>,
}

/// Stateless service answering transcript queries.
pub struct TranscriptService {
    provider: Arc<dyn TranscriptProvider>,
    resolver: ReferenceResolver,
    formatter: Formatter,
    languages: Vec<String>,
    fetch_timeout: Duration,
    context_seconds: f64,
}

impl TranscriptService {
    /// Create a service over the given provider.
    pub fn new(provider: Arc<dyn TranscriptProvider>, settings: &Settings) -> Self {
        Self {
            provider,
            resolver: ReferenceResolver::new(),
            formatter: Formatter::new(settings.formatting.clone()),
            languages: settings.youtube.languages.clone(),
            fetch_timeout: settings.youtube.timeout(),
            context_seconds: settings.search.context_seconds,
        }
    }

    /// Create a service backed by YouTube.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = Arc::new(YoutubeProvider::new(&settings.youtube)?);
        Ok(Self::new(provider, settings))
    }

    /// Override the upper bound on a single transcript fetch.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Resolve a URL or bare ID to the canonical video ID.
    pub fn resolve(&self, video_url: &str) -> Result<VideoId> {
        self.resolver.resolve(video_url)
    }

    /// Fetch the caption track, bounded by the fetch timeout.
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript> {
        let fetch = self.provider.fetch_segments(video_id, &self.languages);
        let segments = tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                TranscriptError::ProviderUnavailable(format!(
                    "transcript fetch for {} timed out after {}s",
                    video_id,
                    self.fetch_timeout.as_secs_f64()
                ))
            })??;

        debug!("Fetched {} caption segments", segments.len());
        Ok(Transcript::new(video_id.clone(), segments))
    }

    async fn title(&self, video_id: &VideoId) -> String {
        self.provider
            .fetch_title(video_id)
            .await
            .unwrap_or_else(|| format!("Video {}", video_id))
    }

    fn format(&self, transcript: &Transcript) -> Vec<FormattedSegment> {
        self.formatter.format(&transcript.segments)
    }

    /// Full formatted transcript.
    #[instrument(skip(self))]
    pub async fn full_transcript(&self, video_url: &str) -> Result<FullTranscript> {
        let video_id = self.resolve(video_url)?;
        let transcript = self.fetch(&video_id).await?;
        let segments = self.format(&transcript);

        info!("Formatted {} segments for {}", segments.len(), video_id);
        Ok(FullTranscript { video_id, segments })
    }

    /// Case-insensitive keyword search.
    ///
    /// `context_seconds` overrides the configured context window.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        video_url: &str,
        term: &str,
        context_seconds: Option<f64>,
    ) -> Result<SearchResults> {
        let video_id = self.resolve(video_url)?;
        let term = query::validate_term(term)?;
        let context_seconds = match context_seconds {
            Some(c) if !c.is_finite() || c < 0.0 => {
                return Err(TranscriptError::InvalidInput(format!(
                    "context_seconds must be a non-negative number, got {}",
                    c
                )));
            }
            Some(c) => c,
            None => self.context_seconds,
        };

        let (transcript, title) = tokio::join!(self.fetch(&video_id), self.title(&video_id));
        let segments = self.format(&transcript?);
        let matches = query::search(&segments, term, context_seconds);

        info!("Found {} matches for '{}' in {}", matches.len(), term, video_id);
        Ok(SearchResults {
            video_id,
            title,
            term: term.to_string(),
            context_seconds,
            matches,
        })
    }

    /// Formatted segments overlapping `[start, end)`; `end = None` runs to the end.
    #[instrument(skip(self))]
    pub async fn extract_section(
        &self,
        video_url: &str,
        start_seconds: f64,
        end_seconds: Option<f64>,
    ) -> Result<TranscriptSection> {
        let video_id = self.resolve(video_url)?;
        query::validate_range(start_seconds, end_seconds)?;

        let (transcript, title) = tokio::join!(self.fetch(&video_id), self.title(&video_id));
        let segments = self.format(&transcript?);
        let segments = query::extract_range(&segments, start_seconds, end_seconds);

        info!("Extracted {} segments from {}", segments.len(), video_id);
        Ok(TranscriptSection {
            video_id,
            title,
            start_seconds,
            end_seconds,
            segments,
        })
    }

    /// Title and available caption languages.
    ///
    /// A video without captions is reported with an empty track list.
    #[instrument(skip(self))]
    pub async fn video_info(&self, video_url: &str) -> Result<VideoInfo> {
        let video_id = self.resolve(video_url)?;

        let listing = tokio::time::timeout(self.fetch_timeout, self.provider.list_tracks(&video_id));
        let (tracks, title) = tokio::join!(listing, self.title(&video_id));

        let tracks = match tracks {
            Err(_) => {
                return Err(TranscriptError::ProviderUnavailable(format!(
                    "caption listing for {} timed out",
                    video_id
                )))
            }
            Ok(Err(TranscriptError::TranscriptsDisabled(reason))) => {
                debug!("No transcripts: {}", reason);
                Vec::new()
            }
            Ok(result) => result?,
        };

        Ok(VideoInfo {
            video_id,
            title,
            tracks,
        })
    }
}
