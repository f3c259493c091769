//! yt-transcript - YouTube transcript retrieval, search and extraction
//!
//! Fetches the captions of a YouTube video, reshapes them into readable
//! timestamped segments, and answers three kinds of queries over them.
//!
//! # Overview
//!
//! yt-transcript allows you to:
//! - Read the full transcript of a video with reconstructed punctuation
//! - Search a transcript for a term, with surrounding context and watch links
//! - Extract the part of a transcript between two times
//!
//! Every operation is available from the command line and as an MCP tool.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `source` - Video reference resolution and caption providers
//! - `transcript` - Transcript model, formatting and queries
//! - `service` - Request pipeline tying the pieces together
//! - `mcp` - MCP server over stdio
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use yt_transcript::config::Settings;
//! use yt_transcript::service::TranscriptService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let service = TranscriptService::from_settings(&settings)?;
//!
//!     let results = service.search("dQw4w9WgXcQ", "never", None).await?;
//!     println!("{}", results.render());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod service;
pub mod source;
pub mod transcript;

pub use error::{ErrorKind, Result, TranscriptError};
