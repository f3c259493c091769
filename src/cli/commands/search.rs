//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::service::TranscriptService;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    video: &str,
    term: &str,
    context: Option<f64>,
    json: bool,
    settings: Settings,
) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;

    let spinner = Output::spinner("Searching...");
    let result = service.search(video, term, context).await;
    spinner.finish_and_clear();

    let results = match result {
        Ok(results) => results,
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    };

    if json {
        return Output::json(&results);
    }

    if results.is_empty() {
        Output::warning(&results.render());
        return Ok(());
    }

    Output::success(&format!(
        "Found {} matches for '{}' in {}",
        results.matches.len(),
        results.term,
        results.title
    ));

    for hit in &results.matches {
        println!();
        for segment in &hit.context_before {
            Output::segment(segment);
        }
        Output::highlight(&hit.segment);
        if let Some(next) = &hit.continuation {
            Output::highlight(next);
        }
        for segment in &hit.context_after {
            Output::segment(segment);
        }
        Output::link(&results.video_id.watch_url(hit.segment.timestamp_seconds));
    }

    Ok(())
}
