//! Plain-text rendering of query results for display to an assistant or user.

use super::{FullTranscript, SearchResults, TranscriptSection, VideoInfo};
use crate::transcript::{format_timestamp, FormattedSegment};

const DIVIDER_WIDTH: usize = 50;

fn push_lines(output: &mut String, segments: &[FormattedSegment]) {
    for segment in segments {
        output.push_str(&segment.to_line());
        output.push('\n');
    }
}

impl FullTranscript {
    /// One `[MM:SS] text` line per formatted segment.
    pub fn render(&self) -> String {
        if self.segments.is_empty() {
            return format!("The transcript for video {} contains no text.", self.video_id);
        }
        let mut output = String::new();
        push_lines(&mut output, &self.segments);
        output
    }
}

impl SearchResults {
    pub fn render(&self) -> String {
        if self.matches.is_empty() {
            return format!(
                "No matches found for '{}' in video: {}",
                self.term, self.title
            );
        }

        let mut output = format!(
            "Found {} matches for '{}' in video: {}\n\n",
            self.matches.len(),
            self.term,
            self.title
        );
        let show_context = self.context_seconds > 0.0;

        for (i, hit) in self.matches.iter().enumerate() {
            if i > 0 {
                output.push_str(&format!("\n{}\n\n", "-".repeat(DIVIDER_WIDTH)));
            }

            if show_context {
                output.push_str(&format!(
                    "=== CONTEXT BEFORE (AVAILABLE: {}s) ===\n",
                    hit.context_before_seconds as u64
                ));
                if hit.context_before.is_empty() {
                    output.push_str("No earlier transcript within the context window\n");
                } else {
                    push_lines(&mut output, &hit.context_before);
                }
                output.push('\n');
            }

            output.push_str("=== MATCH ===\n");
            output.push_str(&hit.segment.to_line());
            output.push('\n');
            if let Some(next) = &hit.continuation {
                output.push_str(&next.to_line());
                output.push('\n');
            }
            output.push_str(&format!(
                "Link: {}\n",
                self.video_id.watch_url(hit.segment.timestamp_seconds)
            ));

            if show_context {
                output.push_str(&format!(
                    "\n=== CONTEXT AFTER (AVAILABLE: {}s) ===\n",
                    hit.context_after_seconds as u64
                ));
                if hit.context_after.is_empty() {
                    output.push_str("No later transcript within the context window\n");
                } else {
                    push_lines(&mut output, &hit.context_after);
                }
            }
        }

        output
    }
}

impl TranscriptSection {
    fn end_label(&self) -> String {
        self.end_seconds
            .map(format_timestamp)
            .unwrap_or_else(|| "end".to_string())
    }

    pub fn render(&self) -> String {
        let start = format_timestamp(self.start_seconds);
        if self.segments.is_empty() {
            return format!(
                "No transcript content between {} and {} in video: {}",
                start,
                self.end_label(),
                self.title
            );
        }

        let mut output = format!(
            "Transcript section from {} to {} of video: {}\n\nTimestamped link: {}\n\n",
            start,
            self.end_label(),
            self.title,
            self.video_id.watch_url(self.start_seconds)
        );
        push_lines(&mut output, &self.segments);
        output
    }
}

impl VideoInfo {
    pub fn render(&self) -> String {
        let mut output = format!("Title: {}\nVideo ID: {}\n", self.title, self.video_id);

        if self.tracks.is_empty() {
            output.push_str("No transcripts available for this video.");
            return output;
        }

        let languages: Vec<String> = self
            .tracks
            .iter()
            .map(|t| {
                if t.is_generated {
                    format!("{} ({}, auto-generated)", t.name, t.language_code)
                } else {
                    format!("{} ({})", t.name, t.language_code)
                }
            })
            .collect();
        output.push_str(&format!(
            "Available transcript languages: {}",
            languages.join(", ")
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::query::SearchMatch;
    use crate::transcript::{CaptionTrackInfo, VideoId};

    fn video() -> VideoId {
        VideoId::new_unchecked("dQw4w9WgXcQ")
    }

    #[test]
    fn test_render_full_transcript() {
        let full = FullTranscript {
            video_id: video(),
            segments: vec![
                FormattedSegment::new(0.0, 2.0, "Hello world."),
                FormattedSegment::new(3725.0, 3727.0, "Much later."),
            ],
        };
        assert_eq!(full.render(), "[00:00] Hello world.\n[01:02:05] Much later.\n");
    }

    #[test]
    fn test_render_search_results() {
        let results = SearchResults {
            video_id: video(),
            title: "Test Video".to_string(),
            term: "hello".to_string(),
            context_seconds: 15.0,
            matches: vec![SearchMatch {
                segment: FormattedSegment::new(20.0, 22.0, "Hello again."),
                continuation: None,
                context_before: vec![FormattedSegment::new(10.0, 12.0, "Goodbye.")],
                context_after: Vec::new(),
                context_before_seconds: 15.0,
                context_after_seconds: 0.0,
            }],
        };

        let text = results.render();
        assert!(text.starts_with("Found 1 matches for 'hello' in video: Test Video"));
        assert!(text.contains("=== CONTEXT BEFORE (AVAILABLE: 15s) ===\n[00:10] Goodbye."));
        assert!(text.contains("=== CONTEXT AFTER (AVAILABLE: 0s) ==="));
        assert!(text.contains("[00:20] Hello again.\nLink: https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=20s"));
        assert!(text.contains("No later transcript"));
    }

    #[test]
    fn test_render_empty_results() {
        let results = SearchResults {
            video_id: video(),
            title: "Test Video".to_string(),
            term: "xyz".to_string(),
            context_seconds: 15.0,
            matches: Vec::new(),
        };
        assert_eq!(results.render(), "No matches found for 'xyz' in video: Test Video");

        let section = TranscriptSection {
            video_id: video(),
            title: "Test Video".to_string(),
            start_seconds: 100.0,
            end_seconds: None,
            segments: Vec::new(),
        };
        assert_eq!(
            section.render(),
            "No transcript content between 01:40 and end in video: Test Video"
        );
    }

    #[test]
    fn test_render_section() {
        let section = TranscriptSection {
            video_id: video(),
            title: "Test Video".to_string(),
            start_seconds: 4.0,
            end_seconds: Some(13.0),
            segments: vec![FormattedSegment::new(0.0, 5.0, "First part.")],
        };
        let text = section.render();
        assert!(text.starts_with("Transcript section from 00:04 to 00:13"));
        assert!(text.contains("&t=4s"));
        assert!(text.ends_with("[00:00] First part.\n"));
    }

    #[test]
    fn test_render_video_info() {
        let info = VideoInfo {
            video_id: video(),
            title: "Test Video".to_string(),
            tracks: vec![CaptionTrackInfo {
                language_code: "en".to_string(),
                name: "English".to_string(),
                is_generated: true,
            }],
        };
        assert!(info
            .render()
            .ends_with("Available transcript languages: English (en, auto-generated)"));
    }
}
