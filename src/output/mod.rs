//! Output module for writing harvest results
//!
//! This module handles:
//! - Serializing the aggregated entries into the playlist file
//! - Recording per-run statistics

mod playlist;
pub mod stats;

pub use playlist::{
    format_entry_line, format_playlist, sanitize_identifier, write_playlist, WrittenFile,
    PLAYLIST_HEADER,
};
pub use stats::{print_statistics, RunStats};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output verification failed: {0}")]
    Verification(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
