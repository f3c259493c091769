//! Transcript command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(video: &str, json: bool, settings: Settings) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = service.full_transcript(video).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(transcript) => transcript,
        Err(e) => {
            Output::error(&format!("Failed to get transcript: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return Output::json(&transcript);
    }

    if transcript.segments.is_empty() {
        Output::warning(&transcript.render());
        return Ok(());
    }

    for segment in &transcript.segments {
        Output::segment(segment);
    }

    Ok(())
}
