//! Playlist file generation
//!
//! The output is the flat "title,url" text format read by DIYP-style IPTV
//! players: a single genre header line followed by one line per stream.
//! Room links are rewritten to point at the local relay, which resolves a
//! Douyu room id into a playable stream.

use crate::config::OutputConfig;
use crate::crawler::Entry;
use crate::output::{OutputError, OutputResult};
use crate::state::AggregateStore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Genre header expected by the player as the first line of the file
pub const PLAYLIST_HEADER: &str = "🐠斗鱼直播🐠,#genre#";

/// Result of a playlist write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Where the playlist was written
    pub path: PathBuf,
    /// Total bytes written, header included
    pub bytes_written: u64,
    /// Number of stream lines (header excluded)
    pub entry_lines: usize,
}

/// Removes every `/` from a raw room link
///
/// `"/9999"` becomes `"9999"`; identifiers without slashes are unchanged.
pub fn sanitize_identifier(identifier: &str) -> String {
    identifier.replace('/', "")
}

/// Formats one stream as a playlist line (without trailing newline)
pub fn format_entry_line(entry: &Entry, relay_template: &str) -> String {
    format!(
        "{},{}{}",
        entry.title,
        relay_template,
        sanitize_identifier(&entry.identifier)
    )
}

/// Formats the whole playlist
///
/// Categories follow the store's iteration order; entries keep the order in
/// which they were appended.
pub fn format_playlist(store: &AggregateStore, relay_template: &str) -> String {
    render(&store.snapshot(), relay_template).0
}

/// Renders a snapshot into playlist text and its stream line count
fn render(snapshot: &[(String, Vec<Entry>)], relay_template: &str) -> (String, usize) {
    let mut playlist = String::new();
    let mut entry_lines = 0usize;
    playlist.push_str(PLAYLIST_HEADER);
    playlist.push('\n');

    for (category, entries) in snapshot {
        tracing::debug!("Writing {} streams for category {}", entries.len(), category);
        for entry in entries {
            playlist.push_str(&format_entry_line(entry, relay_template));
            playlist.push('\n');
            entry_lines += 1;
        }
    }

    (playlist, entry_lines)
}

/// Writes the playlist to the configured path
///
/// Any existing file is truncated. Must only be called once every worker of
/// the run has finished.
///
/// # Arguments
///
/// * `store` - The aggregated entries of the run
/// * `config` - Output path and relay template
///
/// # Returns
///
/// * `Ok(WrittenFile)` - The playlist was written and verified non-empty
/// * `Err(OutputError)` - The file could not be written
pub fn write_playlist(store: &AggregateStore, config: &OutputConfig) -> OutputResult<WrittenFile> {
    let path = Path::new(&config.path);
    let (playlist, entry_lines) = render(&store.snapshot(), &config.relay_template);

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(playlist.as_bytes())?;
    writer.flush()?;
    drop(writer);

    let bytes_written = playlist.len() as u64;

    tracing::info!(
        "Playlist written to {} ({} streams, {} bytes)",
        path.display(),
        entry_lines,
        bytes_written
    );

    verify_written(path)?;

    Ok(WrittenFile {
        path: path.to_path_buf(),
        bytes_written,
        entry_lines,
    })
}

/// Checks that the file exists and is non-empty after a write
fn verify_written(path: &Path) -> OutputResult<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.len() > 0 => {
            tracing::info!("Playlist file verified ({} bytes on disk)", metadata.len());
            Ok(())
        }
        Ok(_) => {
            tracing::warn!("Playlist file {} is empty after write", path.display());
            Err(OutputError::Verification(format!(
                "{} is empty after write",
                path.display()
            )))
        }
        Err(e) => {
            tracing::warn!("Playlist file {} missing after write: {}", path.display(), e);
            Err(OutputError::Verification(format!(
                "{} missing after write: {}",
                path.display(),
                e
            )))
        }
    }
}
