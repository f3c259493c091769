//! Transcript data, readability formatting and queries.
//!
//! Raw [`CaptionSegment`]s come from a provider, the [`Formatter`] turns them
//! into [`FormattedSegment`]s, and the [`query`] functions answer keyword and
//! time-range lookups over the formatted list.

mod formatter;
mod models;
pub mod query;

pub use formatter::{normalize_whitespace, Formatter};
pub use models::{
    format_timestamp, CaptionSegment, CaptionTrackInfo, FormattedSegment, Transcript, VideoId,
};
pub use query::SearchMatch;
