//! Configuration module for yt-transcript.
//!
//! Handles loading and saving the TOML settings file.

mod settings;

pub use settings::{
    FormattingSettings, GeneralSettings, SearchSettings, Settings, YoutubeSettings,
};
