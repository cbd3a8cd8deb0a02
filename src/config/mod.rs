//! Configuration module for the collector
//!
//! This module handles loading, parsing, and validating the TOML seed file,
//! plus the runtime options that apply to every seed of a run.
//!
//! # Example
//!
//! ```no_run
//! use legal_corpus_collector::config::load_seeds;
//! use std::path::Path;
//!
//! let file = load_seeds(Path::new("seeds.toml")).unwrap();
//! println!("Loaded {} seeds", file.seeds.len());
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    CrawlOptions, Seed, SeedFile, UserAgentConfig, DEFAULT_DELAY_SECS,
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_ROOT,
    DEFAULT_PROBE_TIMEOUT_SECS,
};

pub use parser::{compute_seed_file_hash, load_seeds, load_seeds_with_hash, parse_seeds};
