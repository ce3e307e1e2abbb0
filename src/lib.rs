//! Douyu-Playlist: a directory harvester for Douyu live streams
//!
//! This crate fetches a fixed list of category-tagged Douyu directory pages,
//! extracts the stream cards listed on each one, aggregates them by category
//! and writes the result as a flat playlist file for a local media relay.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Douyu-Playlist operations
///
/// Only setup and the playlist write can fail a run. Per-page
/// `NetworkError`/`ParseError` values stay inside the worker.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Transport-level failure for a single directory page
///
/// Covers timeouts, refused connections, non-success status codes and
/// unreadable bodies. Always caught at the worker boundary.
#[derive(Debug, Clone, Error)]
#[error("Network error for {url}: {cause}")]
pub struct NetworkError {
    pub url: String,
    pub cause: String,
}

/// Markup failure for a single directory page
#[derive(Debug, Clone, Error)]
#[error("Parse error for {url}: {cause}")]
pub struct ParseError {
    pub url: String,
    pub cause: String,
}

/// Result type alias for Douyu-Playlist operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, Job};
pub use crawler::{Entry, RawPage};
pub use state::AggregateStore;
