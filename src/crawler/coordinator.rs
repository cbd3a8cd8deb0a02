//! Crawler coordinator - per-seed crawl orchestration
//!
//! This module contains the breadth-first loop for one seed:
//! - Pulling URLs from the frontier
//! - Gating them through the allow-list
//! - Trying the PDF download path, then the HTML path
//! - Expanding HTML pages into new frontier entries
//! - Appending every download to the manifest
//!
//! The loop runs while the frontier is non-empty and the page budget has
//! not been spent. Only expanded HTML pages count against the budget.

use crate::config::{CrawlOptions, Seed};
use crate::crawler::classify::{is_html_content_type, is_pdf_content_type};
use crate::crawler::downloader::{download_pdf, DownloadOutcome};
use crate::crawler::fetcher::{FetchedResponse, Fetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::output::{CrawlStats, ManifestWriter, StopReason};
use crate::url::is_allowed;
use crate::{CollectorError, Result};
use std::path::Path;
use std::time::Instant;

/// Crawl state for a single seed
///
/// Owns the frontier and the counters for one run. Nothing here outlives
/// [`Coordinator::run`], so separate seeds never share state.
pub struct Coordinator<'a, F: Fetcher> {
    seed: &'a Seed,
    options: &'a CrawlOptions,
    fetcher: &'a F,
    frontier: Frontier,
    stats: CrawlStats,
}

impl<'a, F: Fetcher> Coordinator<'a, F> {
    /// Creates a coordinator with the seed's start URLs queued
    pub fn new(seed: &'a Seed, options: &'a CrawlOptions, fetcher: &'a F) -> Self {
        Self {
            seed,
            options,
            fetcher,
            frontier: Frontier::with_start_urls(seed.start_urls.iter().cloned()),
            stats: CrawlStats::new(&seed.name),
        }
    }

    /// Runs the crawl loop to completion
    ///
    /// Per-URL fetch failures are logged and skipped. Filesystem and manifest
    /// errors abort the run.
    pub async fn run(mut self) -> Result<CrawlStats> {
        let start_time = Instant::now();
        let out_dir = self.options.seed_dir(self.seed);
        std::fs::create_dir_all(&out_dir)?;
        let mut manifest = ManifestWriter::open(&self.options.manifest_path(self.seed))?;

        tracing::info!(
            "Crawling seed '{}' ({} start URLs, allowed: {})",
            self.seed.name,
            self.seed.start_urls.len(),
            self.seed.allowed_domains.join(", ")
        );

        let stop_reason = loop {
            if self.stats.pages_visited >= self.options.max_pages {
                break if self.frontier.is_empty() {
                    StopReason::FrontierExhausted
                } else {
                    StopReason::PageBudgetReached
                };
            }

            let url = match self.frontier.next_unseen() {
                Some(url) => url,
                None => break StopReason::FrontierExhausted,
            };

            self.process_url(&url, &out_dir, &mut manifest).await?;
        };

        self.stats.stop_reason = stop_reason;
        self.stats.frontier_remaining = self.frontier.len();
        self.stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Finished seed '{}': {} pages, {} PDFs ({} manifest lines), {} failures in {:?} ({:?})",
            self.seed.name,
            self.stats.pages_visited,
            self.stats.pdfs_downloaded,
            manifest.written(),
            self.stats.fetch_failures,
            self.stats.elapsed,
            stop_reason
        );

        Ok(self.stats)
    }

    /// Processes one dequeued URL
    ///
    /// 1. Drop it if it is off the allow-list
    /// 2. Try the PDF path; a saved PDF ends processing
    /// 3. Otherwise retrieve it as a page (reusing the response of a
    ///    mismatched PDF candidate)
    /// 4. Expand HTML responses into new frontier entries
    async fn process_url(
        &mut self,
        url: &str,
        out_dir: &Path,
        manifest: &mut ManifestWriter,
    ) -> Result<()> {
        if !is_allowed(url, &self.seed.allowed_domains) {
            tracing::debug!("Skipping off-domain URL {}", url);
            self.stats.off_domain_skipped += 1;
            return Ok(());
        }

        let outcome = download_pdf(self.fetcher, &self.seed.name, url, out_dir).await;
        let response = match outcome {
            Ok(DownloadOutcome::Saved(record)) => {
                manifest.append(&record)?;
                tracing::info!("Downloaded {} ({} bytes)", url, record.bytes);
                self.stats.pdfs_downloaded += 1;
                self.stats.bytes_downloaded += record.bytes;
                self.pause().await;
                return Ok(());
            }
            Ok(DownloadOutcome::Mismatch(response)) => {
                self.stats.classification_mismatches += 1;
                response
            }
            Ok(DownloadOutcome::NotPdf) => match self.fetch_page(url).await? {
                Some(response) => response,
                None => return Ok(()),
            },
            Err(e) => {
                self.record_fetch_failure(url, e)?;
                return Ok(());
            }
        };

        if !is_html_content_type(&response.content_type) {
            if is_pdf_content_type(&response.content_type) {
                tracing::debug!("Ignoring unannounced PDF at {}", url);
                self.stats.classification_mismatches += 1;
            } else {
                tracing::debug!(
                    "Not expanding {}: Content-Type '{}'",
                    url,
                    response.content_type
                );
                self.stats.non_html_responses += 1;
            }
            self.pause().await;
            return Ok(());
        }

        let enqueued = self.expand_links(&response);
        self.stats.pages_visited += 1;
        tracing::debug!(
            "Expanded {} ({}/{} pages): {} links queued, frontier {}",
            url,
            self.stats.pages_visited,
            self.options.max_pages,
            enqueued,
            self.frontier.len()
        );
        self.pause().await;
        Ok(())
    }

    /// Retrieves a page, turning fetch failures into `None`
    async fn fetch_page(&mut self, url: &str) -> Result<Option<FetchedResponse>> {
        match self.fetcher.retrieve(url).await {
            Ok(response) => Ok(Some(response)),
            Err(e) => {
                self.record_fetch_failure(url, e)?;
                Ok(None)
            }
        }
    }

    /// Logs and counts a per-URL failure; anything else is passed back
    fn record_fetch_failure(&mut self, url: &str, error: CollectorError) -> Result<()> {
        if !error.is_fetch_failure() {
            return Err(error);
        }
        tracing::warn!("Error fetching {}: {}", url, error);
        self.stats.fetch_failures += 1;
        Ok(())
    }

    /// Queues every allowed, not yet seen link of a page
    fn expand_links(&mut self, response: &FetchedResponse) -> usize {
        let mut enqueued = 0;
        for link in extract_links(&response.text(), &response.final_url) {
            if is_allowed(&link, &self.seed.allowed_domains) && self.frontier.push_if_unseen(link) {
                enqueued += 1;
            }
        }
        enqueued
    }

    async fn pause(&self) {
        if !self.options.delay.is_zero() {
            tokio::time::sleep(self.options.delay).await;
        }
    }
}

/// Crawls one seed with the given fetcher
///
/// # Example
///
/// ```no_run
/// use legal_corpus_collector::config::{CrawlOptions, Seed};
/// use legal_corpus_collector::crawler::{crawl_seed, HttpFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = CrawlOptions::default();
/// let fetcher = HttpFetcher::new(&options)?;
/// let seed = Seed {
///     name: "ohada".to_string(),
///     start_urls: vec!["https://www.ohada.org/".to_string()],
///     allowed_domains: vec!["ohada.org".to_string()],
/// };
/// let stats = crawl_seed(&fetcher, &seed, &options).await?;
/// println!("{} PDFs", stats.pdfs_downloaded);
/// # Ok(())
/// # }
/// ```
pub async fn crawl_seed<F: Fetcher>(
    fetcher: &F,
    seed: &Seed,
    options: &CrawlOptions,
) -> Result<CrawlStats> {
    Coordinator::new(seed, options, fetcher).run().await
}
