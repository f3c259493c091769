//! CLI output formatting utilities.

use crate::transcript::FormattedSegment;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print a transcript segment with its timestamp.
    pub fn segment(segment: &FormattedSegment) {
        println!(
            "{} {}",
            style(format!("[{}]", crate::transcript::format_timestamp(segment.timestamp_seconds)))
                .cyan(),
            segment.text
        );
    }

    /// Print a highlighted transcript segment.
    pub fn highlight(segment: &FormattedSegment) {
        println!(
            "{} {}",
            style(format!("[{}]", crate::transcript::format_timestamp(segment.timestamp_seconds)))
                .green()
                .bold(),
            style(&segment.text).bold()
        );
    }

    /// Print a link.
    pub fn link(url: &str) {
        println!("   {}", style(url).dim());
    }

    /// Print a value as pretty JSON.
    pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
