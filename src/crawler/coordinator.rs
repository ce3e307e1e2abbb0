//! Harvest coordinator - one complete run
//!
//! This module ties a run together:
//! - Building the fetcher and extractor from configuration
//! - Creating the run's aggregate store
//! - Dispatching every job and waiting on the completion barrier
//! - Writing the playlist from the final store

use crate::config::{job_list_fingerprint, Config};
use crate::crawler::dispatcher::Dispatcher;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::parser::{DirectoryExtractor, Extractor};
use crate::output::{write_playlist, RunStats, WrittenFile};
use crate::state::AggregateStore;
use crate::HarvestError;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Outcome counts of every job
    pub stats: RunStats,
    /// The playlist that was written
    pub written: WrittenFile,
    /// Wall time from first launch to playlist written
    pub elapsed: Duration,
    /// Fingerprint of the job list this run harvested
    pub job_list: String,
}

/// Main harvest coordinator
pub struct Harvester<F: ?Sized = HttpFetcher, E: ?Sized = DirectoryExtractor> {
    config: Arc<Config>,
    fetcher: Arc<F>,
    extractor: Arc<E>,
}

impl Harvester {
    /// Creates a harvester backed by the real HTTP fetcher and directory parser
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Client built and selectors compiled
    /// * `Err(HarvestError)` - Client or selector setup failed
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        let extractor = DirectoryExtractor::new(&config.extractor)?;
        Ok(Self::with_parts(config, Arc::new(fetcher), Arc::new(extractor)))
    }
}

impl<F, E> Harvester<F, E>
where
    F: Fetcher + ?Sized + 'static,
    E: Extractor + ?Sized + 'static,
{
    /// Creates a harvester from explicit fetch and extract capabilities
    pub fn with_parts(config: Config, fetcher: Arc<F>, extractor: Arc<E>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
            extractor,
        }
    }

    /// Runs every configured job, then writes the playlist
    ///
    /// Job failures never fail the run; the playlist is written even if no
    /// job succeeded, in which case it holds only the header line.
    pub async fn run(&self) -> Result<HarvestReport, HarvestError> {
        let start_time = Instant::now();
        let job_list = job_list_fingerprint(&self.config.jobs);
        tracing::info!(
            "Starting harvest of {} directory pages (job list {})",
            self.config.jobs.len(),
            &job_list[..12]
        );

        let store = Arc::new(AggregateStore::new());
        let dispatcher = Dispatcher::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            Duration::from_millis(self.config.fetch.launch_delay_ms),
        );

        let stats = dispatcher.run(&self.config.jobs, &store).await;

        tracing::info!(
            "All jobs finished: {} harvested, {} failed, {} streams in {} categories",
            stats.jobs_harvested,
            stats.failed(),
            stats.entries,
            store.category_count()
        );
        if stats.jobs_harvested == 0 {
            tracing::warn!("No directory page was harvested; playlist will only contain the header");
        }

        let written = write_playlist(&store, &self.config.output)?;

        Ok(HarvestReport {
            stats,
            written,
            elapsed: start_time.elapsed(),
            job_list,
        })
    }
}

/// Runs a complete harvest with the real fetcher and parser
///
/// # Example
///
/// ```no_run
/// use douyu_playlist::config::Config;
/// use douyu_playlist::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_harvest(Config::default()).await?;
/// println!("{} streams written", report.written.entry_lines);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<HarvestReport, HarvestError> {
    Harvester::new(config)?.run().await
}
