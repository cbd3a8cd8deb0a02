use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default output root for downloaded artifacts
pub const DEFAULT_OUTPUT_ROOT: &str = "data/legal_corpus";

/// Default number of HTML pages visited per seed
pub const DEFAULT_MAX_PAGES: u32 = 800;

/// Default politeness delay between requests (seconds)
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

/// Default timeout for full-body requests (seconds)
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Default timeout for header-only probes (seconds)
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 20;

/// Top-level structure of a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct SeedFile {
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,

    pub seeds: Vec<Seed>,
}

/// A named crawl target
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Seed {
    /// Unique name, also used as the output sub-directory
    pub name: String,

    /// Start URLs, crawled in order
    #[serde(rename = "start-urls")]
    pub start_urls: Vec<String>,

    /// Host suffixes this seed may fetch from
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Contact address advertised to site operators
    pub contact: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "LegalCorpusCollector".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact: "corpus@example.org".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+contact: CONTACT)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+contact: {})",
            self.crawler_name, self.crawler_version, self.contact
        )
    }
}

/// Runtime options shared by every seed of one collection run
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Root directory; each seed writes to `<output_root>/<seed name>/`
    pub output_root: PathBuf,

    /// Maximum number of HTML pages expanded per seed (PDFs do not count)
    pub max_pages: u32,

    /// Pause after every successful page fetch and PDF download
    pub delay: Duration,

    /// Timeout for full-body requests
    pub fetch_timeout: Duration,

    /// Timeout for header-only probes
    pub probe_timeout: Duration,

    pub user_agent: UserAgentConfig,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            max_pages: DEFAULT_MAX_PAGES,
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            user_agent: UserAgentConfig::default(),
        }
    }
}

impl CrawlOptions {
    /// Output directory for one seed
    pub fn seed_dir(&self, seed: &Seed) -> PathBuf {
        self.output_root.join(&seed.name)
    }

    /// Manifest path for one seed
    pub fn manifest_path(&self, seed: &Seed) -> PathBuf {
        self.seed_dir(seed).join("manifest.jsonl")
    }
}
