//! In-memory fetcher and extractor for exercising the pipeline without a network

use crate::crawler::fetcher::{Fetcher, RawPage};
use crate::crawler::parser::{Entry, Extractor};
use crate::{NetworkError, ParseError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Serves canned bodies keyed by URL; unknown URLs fail like a refused connection
#[derive(Debug, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    started: Mutex<Vec<(String, Instant)>>,
    finished: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn slow_page(mut self, url: &str, body: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self.page(url, body)
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.pages.remove(url);
        self
    }

    /// URLs in the order their fetch started, with start instants
    pub fn started(&self) -> Vec<(String, Instant)> {
        self.started.lock().unwrap().clone()
    }

    /// URLs in the order their fetch completed
    pub fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, NetworkError> {
        self.started
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        let result = match self.pages.get(url) {
            Some(body) => Ok(RawPage {
                url: url.to_string(),
                status: 200,
                body: body.clone(),
            }),
            None => Err(NetworkError {
                url: url.to_string(),
                cause: "Connection failed: connection refused".to_string(),
            }),
        };

        self.finished.lock().unwrap().push(url.to_string());
        result
    }
}

/// Maps page bodies to entries; unknown bodies have no stream cards
#[derive(Debug, Default)]
pub struct FakeExtractor {
    entries: HashMap<String, Vec<Entry>>,
    malformed: HashSet<String>,
    inspected: Mutex<Vec<String>>,
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(mut self, body: &str, entries: Vec<Entry>) -> Self {
        self.entries.insert(body.to_string(), entries);
        self
    }

    pub fn malformed(mut self, body: &str) -> Self {
        self.malformed.insert(body.to_string());
        self
    }

    /// URLs whose card markup was requested, in call order
    pub fn inspected(&self) -> Vec<String> {
        self.inspected.lock().unwrap().clone()
    }
}

impl Extractor for FakeExtractor {
    fn extract(&self, page: &RawPage) -> Result<Vec<Entry>, ParseError> {
        if self.malformed.contains(&page.body) {
            return Err(ParseError {
                url: page.url.clone(),
                cause: "stream card has no title element".to_string(),
            });
        }
        Ok(self.entries.get(&page.body).cloned().unwrap_or_default())
    }

    fn matched_fragments(&self, page: &RawPage) -> Vec<String> {
        self.inspected.lock().unwrap().push(page.url.clone());
        vec![page.body.clone()]
    }
}
