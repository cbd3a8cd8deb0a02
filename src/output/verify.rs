//! Integrity check of downloaded artifacts against their manifest

use crate::crawler::sha256_file;
use crate::output::manifest::{read_manifest, DownloadRecord};
use crate::Result;
use std::path::Path;

/// A manifest record whose file no longer matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestMismatch {
    pub record: DownloadRecord,

    /// Digest recomputed from the file on disk
    pub actual: String,
}

/// Result of verifying one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Records examined
    pub checked: usize,

    /// Records whose file is gone
    pub missing: Vec<DownloadRecord>,

    /// Records whose file hashes differently
    pub mismatched: Vec<DigestMismatch>,
}

impl VerifyReport {
    /// True when every record matched its file
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }
}

/// Recomputes the SHA-256 of every file listed in a manifest
///
/// Files shared by several records (same sanitized name) are checked once
/// per record; an earlier record overwritten by a later download shows up as
/// a mismatch.
pub fn verify_manifest(path: &Path) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();

    for record in read_manifest(path)? {
        report.checked += 1;
        let file = Path::new(&record.path);

        if !file.exists() {
            tracing::warn!("Missing artifact {} ({})", record.path, record.url);
            report.missing.push(record);
            continue;
        }

        let actual = sha256_file(file)?;
        if actual != record.sha256 {
            tracing::warn!(
                "Digest mismatch for {}: manifest {}, file {}",
                record.path,
                record.sha256,
                actual
            );
            report.mismatched.push(DigestMismatch { record, actual });
        }
    }

    Ok(report)
}
