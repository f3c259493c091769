//! CLI module for yt-transcript.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// yt-transcript - YouTube transcript retrieval, search and extraction
///
/// Reads a video's captions, reconstructs punctuation, and answers queries over
/// the result. Run `yt-transcript mcp` to serve the same queries to an AI assistant.
#[derive(Parser, Debug)]
#[command(name = "yt-transcript")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "YT_TRANSCRIPT_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server for AI assistant integration (Claude, etc.)
    Mcp,

    /// Print the full formatted transcript of a video
    Transcript {
        /// YouTube URL or video ID
        video: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search a transcript for a term
    Search {
        /// YouTube URL or video ID
        video: String,

        /// Term to search for (case-insensitive)
        term: String,

        /// Seconds of context around each match (defaults to the configured value)
        #[arg(short = 'C', long)]
        context: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract the transcript between two times
    Section {
        /// YouTube URL or video ID
        video: String,

        /// Start time in seconds
        start: f64,

        /// End time in seconds (omit for end of video)
        end: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the title and available caption languages of a video
    Info {
        /// YouTube URL or video ID
        video: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
