//! Append-only JSON Lines manifest of downloaded artifacts

use crate::{CollectorError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One successfully downloaded PDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    /// Seed the artifact was collected for
    pub seed: String,

    /// URL the artifact was retrieved from
    pub url: String,

    /// Local file path
    pub path: String,

    /// Lowercase hex SHA-256 of the stored bytes
    pub sha256: String,

    /// Content-Type of the retrieval response (may be empty)
    pub content_type: String,

    /// File size
    pub bytes: u64,

    /// Download time, seconds since the Unix epoch
    pub downloaded_at: i64,
}

/// Appends records to a seed's `manifest.jsonl`
///
/// The file is opened once in append mode and kept open. Each record is
/// written as a single line and flushed before [`ManifestWriter::append`]
/// returns, so an interrupted run leaves only complete lines behind.
#[derive(Debug)]
pub struct ManifestWriter {
    writer: BufWriter<File>,
    written: u64,
}

impl ManifestWriter {
    /// Opens (or creates) the manifest for appending
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Writes one record and flushes it to the file
    pub fn append(&mut self, record: &DownloadRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Records appended through this writer
    pub fn written(&self) -> u64 {
        self.written
    }
}

/// Reads every record from a manifest file
///
/// Blank lines are ignored. A malformed line is reported with its line number.
pub fn read_manifest(path: &Path) -> Result<Vec<DownloadRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| CollectorError::ManifestLine {
            path: path.display().to_string(),
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}
