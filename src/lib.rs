//! Legal corpus collector: a polite PDF harvester
//!
//! This crate crawls seeded legal-document websites breadth-first, stays inside
//! each seed's allowed domains, downloads every PDF it finds and records each
//! download in an append-only JSON Lines manifest.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for collector operations
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Manifest encoding error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Malformed manifest line {path}:{line}: {source}")]
    ManifestLine {
        path: String,
        line: usize,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CollectorError {
    /// Returns true for errors that only affect the URL being fetched
    ///
    /// These are recovered by the crawl loop; everything else aborts the run.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Timeout { .. } | Self::HttpStatus { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in seed file: {0}")]
    InvalidUrl(String),

    #[error("Invalid allowed domain: {0}")]
    InvalidDomain(String),

    #[error("Duplicate seed name: {0}")]
    DuplicateSeed(String),
}

/// Result type alias for collector operations
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{CrawlOptions, Seed, SeedFile};
pub use crawler::{crawl_seed, run_collection, Coordinator, Fetcher, HttpFetcher};
pub use output::{CrawlStats, DownloadRecord, ManifestWriter};
pub use crate::url::{extract_domain, is_allowed, resolve_link};
