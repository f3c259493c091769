//! MCP command implementation.

use crate::config::Settings;
use crate::mcp::McpServer;
use crate::service::TranscriptService;
use anyhow::Result;

/// Run the MCP server.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    let service = TranscriptService::from_settings(&settings)?;
    let server = McpServer::new(service);
    server.run().await
}
