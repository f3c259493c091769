//! Error types for yt-transcript.

use serde::Serialize;
use thiserror::Error;

/// Library-level error type for transcript operations.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Invalid video reference: {0}")]
    InvalidReference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Transcripts disabled: {0}")]
    TranscriptsDisabled(String),

    #[error("Transcript provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Coarse classification of a [`TranscriptError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidReference,
    InvalidInput,
    VideoNotFound,
    TranscriptsDisabled,
    ProviderUnavailable,
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::InvalidReference => "invalid_reference",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::VideoNotFound => "video_not_found",
            ErrorKind::TranscriptsDisabled => "transcripts_disabled",
            ErrorKind::ProviderUnavailable => "provider_unavailable",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl TranscriptError {
    /// Classify this error for callers that branch on the failure type.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscriptError::InvalidReference(_) => ErrorKind::InvalidReference,
            TranscriptError::InvalidInput(_) => ErrorKind::InvalidInput,
            TranscriptError::VideoNotFound(_) => ErrorKind::VideoNotFound,
            TranscriptError::TranscriptsDisabled(_) => ErrorKind::TranscriptsDisabled,
            TranscriptError::ProviderUnavailable(_) => ErrorKind::ProviderUnavailable,
            TranscriptError::Unknown(_)
            | TranscriptError::Config(_)
            | TranscriptError::Io(_)
            | TranscriptError::Json(_)
            | TranscriptError::TomlParse(_) => ErrorKind::Unknown,
        }
    }
}

/// Result type alias for transcript operations.
pub type Result<T> = std::result::Result<T, TranscriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            TranscriptError::VideoNotFound("abc".into()).kind(),
            ErrorKind::VideoNotFound
        );
        assert_eq!(
            TranscriptError::Config("bad".into()).kind(),
            ErrorKind::Unknown
        );
        assert_eq!(ErrorKind::ProviderUnavailable.to_string(), "provider_unavailable");
    }
}
