//! Run statistics
//!
//! Tallies the terminal state of every job launched in a run so the outcome
//! can be logged and printed once the barrier has been crossed.

use crate::crawler::JobOutcome;

/// Outcome counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of jobs launched
    pub jobs_launched: usize,

    /// Jobs that were fetched and extracted
    pub jobs_harvested: usize,

    /// Jobs that failed at the network layer
    pub network_failures: usize,

    /// Jobs whose page could not be extracted
    pub parse_failures: usize,

    /// Jobs whose task panicked or was cancelled
    pub aborted: usize,

    /// Entries appended across all jobs
    pub entries: usize,
}

impl RunStats {
    /// Creates an empty tally for `jobs_launched` jobs
    pub fn new(jobs_launched: usize) -> Self {
        Self {
            jobs_launched,
            ..Self::default()
        }
    }

    /// Records the terminal state of one job
    pub fn record(&mut self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Harvested { entries } => {
                self.jobs_harvested += 1;
                self.entries += entries;
            }
            JobOutcome::NetworkFailed(_) => self.network_failures += 1,
            JobOutcome::ParseFailed(_) => self.parse_failures += 1,
        }
    }

    /// Records a task that never produced an outcome
    pub fn record_aborted(&mut self) {
        self.aborted += 1;
    }

    /// Total jobs that contributed nothing
    pub fn failed(&self) -> usize {
        self.network_failures + self.parse_failures + self.aborted
    }

    /// Number of jobs that reached a terminal state
    pub fn completed(&self) -> usize {
        self.jobs_harvested + self.failed()
    }
}

/// Prints run statistics to stdout
pub fn print_statistics(stats: &RunStats) {
    println!("=== Harvest Statistics ===\n");
    println!("Jobs launched:     {}", stats.jobs_launched);
    println!("Jobs harvested:    {}", stats.jobs_harvested);
    println!("Network failures:  {}", stats.network_failures);
    println!("Parse failures:    {}", stats.parse_failures);
    if stats.aborted > 0 {
        println!("Aborted tasks:     {}", stats.aborted);
    }
    println!("Streams collected: {}", stats.entries);
}
