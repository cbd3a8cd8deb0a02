//! Crawler module for page traversal and PDF collection
//!
//! This module contains the core crawling logic, including:
//! - HTTP probing and retrieval behind the [`Fetcher`] trait
//! - PDF classification and artifact download
//! - HTML link extraction
//! - The per-seed breadth-first frontier
//! - Overall crawl coordination

mod classify;
mod coordinator;
mod downloader;
mod fetcher;
mod frontier;
mod parser;

pub use classify::{is_html_content_type, is_pdf_content_type, looks_like_pdf};
pub use coordinator::{crawl_seed, Coordinator};
pub use downloader::{download_pdf, safe_filename, sha256_file, DownloadOutcome};
pub use fetcher::{build_http_client, FetchedResponse, Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use parser::extract_links;

use crate::config::{CrawlOptions, Seed};
use crate::output::CrawlStats;
use crate::Result;

/// Runs a complete collection over every seed
///
/// Seeds are crawled one after another with a shared HTTP client. Each seed
/// gets its own frontier and manifest. The first fatal error stops the run;
/// statistics of seeds finished before it are lost.
///
/// # Arguments
///
/// * `seeds` - Validated seed definitions, in crawl order
/// * `options` - Run-wide options (output root, budget, delay, timeouts)
///
/// # Returns
///
/// * `Ok(Vec<CrawlStats>)` - One entry per seed, in crawl order
/// * `Err(CollectorError)` - Client construction or a seed failed fatally
pub async fn run_collection(
    seeds: &[Seed],
    options: &CrawlOptions,
) -> Result<Vec<CrawlStats>> {
    let fetcher = HttpFetcher::new(options)?;
    tracing::info!(
        "Collecting {} seeds into {} as '{}'",
        seeds.len(),
        options.output_root.display(),
        options.user_agent.header_value()
    );

    let mut all_stats = Vec::with_capacity(seeds.len());
    for seed in seeds {
        all_stats.push(crawl_seed(&fetcher, seed, options).await?);
    }

    Ok(all_stats)
}
