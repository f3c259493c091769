//! Section command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use crate::transcript::format_timestamp;
use anyhow::Result;

/// Run the section command.
pub async fn run_section(
    video: &str,
    start: f64,
    end: Option<f64>,
    json: bool,
    settings: Settings,
) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = service.extract_section(video, start, end).await;
    spinner.finish_and_clear();

    let section = match result {
        Ok(section) => section,
        Err(e) => {
            Output::error(&format!("Failed to extract section: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return Output::json(&section);
    }

    if section.is_empty() {
        Output::warning(&section.render());
        return Ok(());
    }

    let end_label = section
        .end_seconds
        .map(format_timestamp)
        .unwrap_or_else(|| "end".to_string());
    Output::header(&format!(
        "{} ({} to {})",
        section.title,
        format_timestamp(section.start_seconds),
        end_label
    ));
    Output::link(&section.video_id.watch_url(section.start_seconds));
    println!();

    for segment in &section.segments {
        Output::segment(segment);
    }

    Ok(())
}
