//! Configuration module for Douyu-Playlist
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the built-in defaults,
//! which reproduce the stock Douyu directory list.
//!
//! # Example
//!
//! ```no_run
//! use douyu_playlist::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("douyu.toml")).unwrap();
//! println!("Harvesting {} directory pages", config.jobs.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExtractorConfig, FetchConfig, Job, OutputConfig, DEFAULT_RELAY_TEMPLATE,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{job_list_fingerprint, load_config, parse_config};
pub use validation::validate;
