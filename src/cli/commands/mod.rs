//! CLI command implementations.

mod config;
mod info;
mod mcp;
mod search;
mod section;
mod transcript;

pub use config::run_config;
pub use info::run_info;
pub use mcp::run_mcp;
pub use search::run_search;
pub use section::run_section;
pub use transcript::run_transcript;
