//! Per-seed crawl statistics
//!
//! This module provides the counters kept by the crawl loop and the
//! summary printed once all seeds are done.

use std::time::Duration;

/// Why a seed's crawl loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No URLs were left in the frontier
    FrontierExhausted,

    /// The HTML page budget was spent
    PageBudgetReached,
}

/// Counters for one seed's crawl run
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStats {
    /// Seed name
    pub seed: String,

    /// HTML pages fetched and expanded (the budgeted counter)
    pub pages_visited: u32,

    /// PDFs written to disk and logged in the manifest
    pub pdfs_downloaded: u32,

    /// Total size of the downloaded PDFs
    pub bytes_downloaded: u64,

    /// URLs abandoned after a network error or non-success status
    pub fetch_failures: u32,

    /// PDF candidates whose retrieved Content-Type disagreed with the probe
    pub classification_mismatches: u32,

    /// Dequeued URLs dropped by the allow-list
    pub off_domain_skipped: u32,

    /// Responses that were neither PDF nor HTML
    pub non_html_responses: u32,

    /// Entries still queued when the loop stopped
    pub frontier_remaining: usize,

    pub stop_reason: StopReason,

    pub elapsed: Duration,
}

impl CrawlStats {
    /// Creates zeroed statistics for a seed
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            pages_visited: 0,
            pdfs_downloaded: 0,
            bytes_downloaded: 0,
            fetch_failures: 0,
            classification_mismatches: 0,
            off_domain_skipped: 0,
            non_html_responses: 0,
            frontier_remaining: 0,
            stop_reason: StopReason::FrontierExhausted,
            elapsed: Duration::ZERO,
        }
    }
}

/// Prints per-seed statistics to stdout in a formatted manner
pub fn print_statistics(all: &[CrawlStats]) {
    println!("=== Collection Summary ===\n");

    for stats in all {
        println!("Seed: {}", stats.seed);
        println!("  HTML pages visited: {}", stats.pages_visited);
        println!(
            "  PDFs downloaded: {} ({} bytes)",
            stats.pdfs_downloaded, stats.bytes_downloaded
        );
        println!("  Fetch failures: {}", stats.fetch_failures);
        println!(
            "  Classification mismatches: {}",
            stats.classification_mismatches
        );
        println!("  Off-domain URLs skipped: {}", stats.off_domain_skipped);
        println!("  Non-HTML responses: {}", stats.non_html_responses);
        match stats.stop_reason {
            StopReason::FrontierExhausted => println!("  Stopped: frontier exhausted"),
            StopReason::PageBudgetReached => println!(
                "  Stopped: page budget reached ({} URLs left in frontier)",
                stats.frontier_remaining
            ),
        }
        println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
        println!();
    }

    let total_pdfs: u32 = all.iter().map(|s| s.pdfs_downloaded).sum();
    let total_pages: u32 = all.iter().map(|s| s.pages_visited).sum();
    println!(
        "Total: {} PDFs downloaded from {} HTML pages across {} seeds",
        total_pdfs,
        total_pages,
        all.len()
    );
}
