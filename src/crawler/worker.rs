//! Per-job worker task
//!
//! A worker runs fetch → extract → append for one job. Both failure kinds
//! stop the job right there: it contributes no entries and the failure is
//! reported through its `JobOutcome`, never as an error to the caller.

use crate::config::Job;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::Extractor;
use crate::state::AggregateStore;
use crate::{NetworkError, ParseError};

/// Terminal state of one job
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// Page fetched and extracted; entries were appended to the store
    Harvested { entries: usize },

    /// The fetch failed; nothing was appended
    NetworkFailed(NetworkError),

    /// The page could not be extracted; nothing was appended
    ParseFailed(ParseError),
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Harvested { .. })
    }

    /// Number of entries this job contributed
    pub fn entries(&self) -> usize {
        match self {
            Self::Harvested { entries } => *entries,
            _ => 0,
        }
    }
}

/// Runs one job to completion
///
/// # Arguments
///
/// * `job` - The directory page and its category
/// * `fetcher` - Page source
/// * `extractor` - Markup parser
/// * `store` - Shared accumulator for the run
pub async fn run_job<F, E>(job: &Job, fetcher: &F, extractor: &E, store: &AggregateStore) -> JobOutcome
where
    F: Fetcher + ?Sized,
    E: Extractor + ?Sized,
{
    tracing::info!("Fetching [{}] {}", job.category, job.url);

    let page = match fetcher.fetch(&job.url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Request failed: {}", e);
            return JobOutcome::NetworkFailed(e);
        }
    };

    let entries = match extractor.extract(&page) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Extraction failed: {}", e);
            for fragment in extractor.matched_fragments(&page) {
                tracing::debug!("Card markup on {}: {}", job.url, fragment);
            }
            return JobOutcome::ParseFailed(e);
        }
    };

    let count = entries.len();
    if count == 0 {
        tracing::debug!("No stream cards matched on {}", job.url);
    }
    store.append(&job.category, entries);

    tracing::info!("Harvested {} streams from {} [{}]", count, job.url, job.category);
    JobOutcome::Harvested { entries: count }
}
