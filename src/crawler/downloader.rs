//! PDF downloader
//!
//! Given a candidate URL, this module probes it, retrieves it if it still
//! looks like a PDF, writes the body under the seed's output directory and
//! returns the record that goes into the manifest.

use crate::crawler::classify::looks_like_pdf;
use crate::crawler::fetcher::{FetchedResponse, Fetcher};
use crate::output::DownloadRecord;
use crate::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use url::Url;

/// File name used when a URL has no usable last path segment
const FALLBACK_FILE_NAME: &str = "download.pdf";

/// What happened to a download candidate
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The probe did not suggest a PDF; nothing was retrieved
    NotPdf,

    /// The probe suggested a PDF but the retrieved response did not confirm
    /// it; nothing was written. The response is handed back so the caller
    /// can treat it as an ordinary page.
    Mismatch(FetchedResponse),

    /// The PDF was written and hashed
    Saved(DownloadRecord),
}

/// Probes, retrieves and stores a PDF candidate
///
/// # Flow
///
/// 1. Probe the URL; a failed probe counts as "content type unknown"
/// 2. If neither the URL nor the probed type looks like a PDF → `NotPdf`
/// 3. Retrieve the full body (errors propagate to the caller)
/// 4. Re-classify with the retrieved Content-Type; on failure → `Mismatch`
/// 5. Write the body to `<out_dir>/<safe_filename(url)>`, overwriting any
///    earlier file of the same name
/// 6. Hash the written file and return the populated record
///
/// # Errors
///
/// Fetch errors (`CollectorError::is_fetch_failure`) concern only this URL.
/// Filesystem errors are returned as `CollectorError::Io`.
pub async fn download_pdf<F: Fetcher>(
    fetcher: &F,
    seed_name: &str,
    url: &str,
    out_dir: &Path,
) -> Result<DownloadOutcome> {
    let probed = fetcher.probe(url).await;
    if !looks_like_pdf(url, probed.as_deref()) {
        return Ok(DownloadOutcome::NotPdf);
    }

    let response = fetcher.retrieve(url).await?;
    if !looks_like_pdf(url, Some(response.content_type.as_str())) {
        tracing::debug!(
            "Discarding {}: retrieved Content-Type '{}' is not a PDF",
            url,
            response.content_type
        );
        return Ok(DownloadOutcome::Mismatch(response));
    }

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(safe_filename(url));
    std::fs::write(&path, &response.body)?;

    let sha256 = sha256_file(&path)?;
    let bytes = std::fs::metadata(&path)?.len();

    Ok(DownloadOutcome::Saved(DownloadRecord {
        seed: seed_name.to_string(),
        url: url.to_string(),
        path: path.display().to_string(),
        sha256,
        content_type: response.content_type,
        bytes,
        downloaded_at: chrono::Utc::now().timestamp(),
    }))
}

/// Derives a file name from the last segment of the URL's path
///
/// The segment is taken as it appears in the URL (percent escapes are not
/// decoded). Runs of characters outside `[A-Za-z0-9._-]` collapse to a single `_`, and
/// a `.pdf` suffix is appended unless already present (any case). Different
/// URLs may map to the same name.
///
/// # Examples
///
/// ```
/// use legal_corpus_collector::crawler::safe_filename;
///
/// assert_eq!(safe_filename("https://example.org/textes/Acte(1).pdf"), "Acte_1_.pdf");
/// assert_eq!(safe_filename("https://example.org/get?id=7"), "get.pdf");
/// assert_eq!(safe_filename("https://example.org/"), "download.pdf");
/// ```
pub fn safe_filename(url: &str) -> String {
    let segment = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());

    let mut name = String::with_capacity(segment.len() + 4);
    let mut in_run = false;
    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            name.push(ch);
            in_run = false;
        } else if !in_run {
            name.push('_');
            in_run = true;
        }
    }

    if !name.to_ascii_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    name
}

/// Computes the hex-encoded SHA-256 digest of a file
pub fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 1024 * 1024];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
