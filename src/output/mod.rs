//! Output module for crawl results
//!
//! This module handles:
//! - Writing and reading the per-seed download manifest
//! - Recording and printing crawl statistics
//! - Verifying stored artifacts against their recorded digests

mod manifest;
pub mod stats;
mod verify;

pub use manifest::{read_manifest, DownloadRecord, ManifestWriter};
pub use stats::{print_statistics, CrawlStats, StopReason};
pub use verify::{verify_manifest, DigestMismatch, VerifyReport};
