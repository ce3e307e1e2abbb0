//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the HTTP client with a bounded timeout and a browser user agent
//! - GET requests for directory pages
//! - Error classification into `NetworkError`
//!
//! One request per call, no retries: a page that fails is left out of the
//! playlist for this run.

use crate::config::FetchConfig;
use crate::NetworkError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A fetched directory page
#[derive(Debug, Clone)]
pub struct RawPage {
    /// URL the page was requested from
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Decoded response body
    pub body: String,
}

/// Capability to fetch one page
///
/// Implementations apply their own timeout and never panic on transport
/// failures; every failure is returned as a `NetworkError`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawPage, NetworkError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reqwest-backed fetcher used for real runs
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the fetch configuration
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, NetworkError> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies any failure
///
/// | Condition | Cause |
/// |-----------|-------|
/// | Timeout | `Request timeout: <error chain>` |
/// | Connect failure (refused, DNS, TLS) | `Connection failed: <error chain>` |
/// | Non-2xx status | `HTTP <code>` |
/// | Body read failure | error chain |
/// | Anything else | error chain |
///
/// The error chain is the reqwest error followed by each of its sources,
/// so the OS or resolver message survives into the log.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> Result<RawPage, NetworkError> {
    let network_error = |cause: String| NetworkError {
        url: url.to_string(),
        cause,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| network_error(classify_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(network_error(format!("HTTP {}", status.as_u16())));
    }

    let body = response
        .text()
        .await
        .map_err(|e| network_error(classify_error(&e)))?;

    Ok(RawPage {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

fn classify_error(error: &reqwest::Error) -> String {
    let detail = error_chain(error);
    if error.is_timeout() {
        format!("Request timeout: {}", detail)
    } else if error.is_connect() {
        format!("Connection failed: {}", detail)
    } else {
        detail
    }
}

/// Joins an error and all of its sources into one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
