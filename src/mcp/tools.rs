//! MCP tool definitions for yt-transcript.

use super::protocol::Tool;
use serde_json::json;

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "get_full_transcript".to_string(),
            description: "Get the full transcript of a YouTube video. \
                Returns one line per sentence-like segment, each prefixed with its [MM:SS] timestamp. \
                Punctuation is reconstructed heuristically from raw captions."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    }
                },
                "required": ["video_url"]
            }),
        },
        Tool {
            name: "search_transcript".to_string(),
            description: "Search a YouTube video transcript for a term (case-insensitive literal match). \
                Returns every matching segment with its timestamp, a timestamped watch link, \
                and surrounding context. Reports explicitly when nothing matches."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    },
                    "search_term": {
                        "type": "string",
                        "description": "Term to find in the transcript"
                    },
                    "context_seconds": {
                        "type": "number",
                        "description": "Seconds of context to include before and after each match",
                        "minimum": 0
                    }
                },
                "required": ["video_url", "search_term"]
            }),
        },
        Tool {
            name: "extract_transcript_section".to_string(),
            description: "Get the part of a YouTube video transcript between two times. \
                Includes every segment that overlaps the window [start_time, end_time)."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    },
                    "start_time": {
                        "type": "number",
                        "description": "Start time in seconds",
                        "minimum": 0
                    },
                    "end_time": {
                        "type": "number",
                        "description": "End time in seconds (omit for end of video)"
                    }
                },
                "required": ["video_url", "start_time"]
            }),
        },
        Tool {
            name: "get_video_information".to_string(),
            description: "Get the title, ID and available transcript languages of a YouTube video."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url": {
                        "type": "string",
                        "description": "YouTube video URL or ID"
                    }
                },
                "required": ["video_url"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_are_unique() {
        let tools = get_tools();
        let mut names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), tools.len());
    }

    #[test]
    fn test_every_tool_requires_video_url() {
        for tool in get_tools() {
            let required = tool.input_schema["required"].as_array().unwrap();
            assert!(required.iter().any(|v| v == "video_url"), "{}", tool.name);
        }
    }
}
