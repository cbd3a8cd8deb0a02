//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - HEAD probes to guess the Content-Type cheaply
//! - GET requests to retrieve full bodies
//! - Error classification
//!
//! Every request is awaited to completion before the caller moves on, and
//! every request carries an explicit timeout.

use crate::config::{CrawlOptions, UserAgentConfig};
use crate::CollectorError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum number of redirects followed per request
const MAX_REDIRECTS: usize = 10;

/// A fully retrieved response
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value (empty when absent)
    pub content_type: String,

    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedResponse {
    /// Body decoded as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The two network capabilities the crawl loop needs
///
/// Keeping probe and retrieve separate lets callers (and tests) treat a
/// failed probe differently from a failed retrieval.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Header-only request; returns the Content-Type, or `None` when the
    /// probe failed. Never errors.
    async fn probe(&self, url: &str) -> Option<String>;

    /// Full-body request; non-success statuses are errors
    async fn retrieve(&self, url: &str) -> Result<FetchedResponse, CollectorError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use legal_corpus_collector::config::UserAgentConfig;
/// use legal_corpus_collector::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `Fetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    probe_timeout: Duration,
    fetch_timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from the run options
    pub fn new(options: &CrawlOptions) -> Result<Self, CollectorError> {
        let client = build_http_client(&options.user_agent, options.fetch_timeout)?;
        Ok(Self::with_client(
            client,
            options.probe_timeout,
            options.fetch_timeout,
        ))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client, probe_timeout: Duration, fetch_timeout: Duration) -> Self {
        Self {
            client,
            probe_timeout,
            fetch_timeout,
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn probe(&self, url: &str) -> Option<String> {
        match self
            .client
            .head(url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => Some(content_type_of(&response)),
            Err(e) => {
                tracing::debug!("Probe failed for {}: {}", url, e);
                None
            }
        }
    }

    async fn retrieve(&self, url: &str) -> Result<FetchedResponse, CollectorError> {
        let response = self
            .client
            .get(url)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = content_type_of(&response);
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?
            .to_vec();

        Ok(FetchedResponse {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        })
    }
}

fn content_type_of(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

fn classify_error(url: &str, error: reqwest::Error) -> CollectorError {
    if error.is_timeout() {
        CollectorError::Timeout {
            url: url.to_string(),
        }
    } else {
        CollectorError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
