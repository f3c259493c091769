//! Info command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;

/// Run the info command.
pub async fn run_info(video: &str, json: bool, settings: Settings) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;

    let spinner = Output::spinner("Looking up video...");
    let result = service.video_info(video).await;
    spinner.finish_and_clear();

    let info = match result {
        Ok(info) => info,
        Err(e) => {
            Output::error(&format!("Failed to look up video: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return Output::json(&info);
    }

    Output::header(&info.title);
    Output::kv("Video ID", info.video_id.as_str());
    Output::kv("URL", &info.video_id.watch_url(0.0));

    if info.tracks.is_empty() {
        Output::warning("No transcripts available for this video.");
        return Ok(());
    }

    Output::header("Transcript languages");
    for track in &info.tracks {
        let kind = if track.is_generated { "auto-generated" } else { "manual" };
        Output::list_item(&format!("{} ({}, {})", track.name, track.language_code, kind));
    }

    Ok(())
}
