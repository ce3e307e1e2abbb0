//! Crawler module for the fetch-and-aggregate pipeline
//!
//! This module contains the harvesting logic, including:
//! - HTTP fetching of directory pages
//! - Stream card extraction from directory markup
//! - Per-job worker tasks
//! - Staggered dispatch and the completion barrier
//! - Overall run coordination

mod coordinator;
mod dispatcher;
mod fetcher;
mod parser;
mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{run_harvest, HarvestReport, Harvester};
pub use dispatcher::Dispatcher;
pub use fetcher::{build_http_client, fetch_url, Fetcher, HttpFetcher, RawPage};
pub use parser::{DirectoryExtractor, Entry, Extractor};
pub use worker::{run_job, JobOutcome};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete harvest operation
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client and compile the card selectors
/// 2. Launch one worker per job, staggered by the launch delay
/// 3. Wait until every worker has finished
/// 4. Write the playlist file
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(HarvestReport)` - Run finished and the playlist was written
/// * `Err(HarvestError)` - Setup or the playlist write failed
pub async fn harvest(config: Config) -> Result<HarvestReport, HarvestError> {
    run_harvest(config).await
}
