//! Job dispatcher: staggered launch and completion barrier
//!
//! Jobs are spawned in configured order with a fixed pause between launches
//! so the directory host never sees a burst of simultaneous requests. Once
//! everything is launched the dispatcher joins every task; nothing downstream
//! reads the store until that join has drained.

use crate::config::Job;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::Extractor;
use crate::crawler::worker::run_job;
use crate::output::RunStats;
use crate::state::AggregateStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Launches one worker task per job and waits for all of them
pub struct Dispatcher<F: ?Sized, E: ?Sized> {
    fetcher: Arc<F>,
    extractor: Arc<E>,
    launch_delay: Duration,
}

impl<F, E> Dispatcher<F, E>
where
    F: Fetcher + ?Sized + 'static,
    E: Extractor + ?Sized + 'static,
{
    /// Creates a new dispatcher
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Shared page source
    /// * `extractor` - Shared markup parser
    /// * `launch_delay` - Pause between two consecutive launches
    pub fn new(fetcher: Arc<F>, extractor: Arc<E>, launch_delay: Duration) -> Self {
        Self {
            fetcher,
            extractor,
            launch_delay,
        }
    }

    /// Runs every job and returns once all of them reached a terminal state
    ///
    /// Failures inside a job only show up in the returned statistics. A task
    /// that panics is counted as aborted; its siblings keep running.
    pub async fn run(&self, jobs: &[Job], store: &Arc<AggregateStore>) -> RunStats {
        let mut tasks = JoinSet::new();

        for (index, job) in jobs.iter().enumerate() {
            if index > 0 && !self.launch_delay.is_zero() {
                tokio::time::sleep(self.launch_delay).await;
            }

            let job = job.clone();
            let fetcher = Arc::clone(&self.fetcher);
            let extractor = Arc::clone(&self.extractor);
            let store = Arc::clone(store);

            tasks.spawn(async move {
                run_job(&job, fetcher.as_ref(), extractor.as_ref(), &store).await
            });
        }

        tracing::debug!("Launched {} jobs, waiting for completion", jobs.len());

        let mut stats = RunStats::new(jobs.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => stats.record(&outcome),
                Err(e) => {
                    tracing::error!("Worker task aborted: {}", e);
                    stats.record_aborted();
                }
            }
        }

        stats
    }
}
