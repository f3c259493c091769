//! MCP (Model Context Protocol) server for yt-transcript.
//!
//! Exposes the transcript queries as tools to AI assistants.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
