//! Category-keyed accumulation of extracted stream cards
//!
//! Every worker task of a run appends into one `AggregateStore`. A single
//! mutex covers the whole map, so creating a bucket and extending it happen
//! in one critical section and no append can observe or leave a half-written
//! bucket.

use crate::crawler::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shared store mapping category labels to the entries harvested for them
#[derive(Debug, Default)]
pub struct AggregateStore {
    buckets: Mutex<HashMap<String, Vec<Entry>>>,
}

impl AggregateStore {
    /// Creates an empty store for one run
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the entries of one page to a category's bucket
    ///
    /// The bucket is created if absent, even when `entries` is empty, so a
    /// category whose page listed nothing still shows up as an empty bucket.
    pub fn append(&self, category: &str, entries: Vec<Entry>) {
        let mut buckets = self.lock();
        buckets
            .entry(category.to_string())
            .or_default()
            .extend(entries);
    }

    /// Copies out every bucket in the map's iteration order
    pub fn snapshot(&self) -> Vec<(String, Vec<Entry>)> {
        self.lock()
            .iter()
            .map(|(category, entries)| (category.clone(), entries.clone()))
            .collect()
    }

    /// Returns a copy of one category's bucket
    pub fn bucket(&self, category: &str) -> Option<Vec<Entry>> {
        self.lock().get(category).cloned()
    }

    /// Total number of entries across all categories
    pub fn total_entries(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    /// Number of categories with a bucket (possibly empty)
    pub fn category_count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// Consumes the store and returns the underlying map
    pub fn into_inner(self) -> HashMap<String, Vec<Entry>> {
        self.buckets
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Appends never leave a bucket half-extended, so a poisoned map is still consistent
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Entry>>> {
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
