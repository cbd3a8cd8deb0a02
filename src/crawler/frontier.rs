//! Frontier for one seed's crawl run
//!
//! This module handles:
//! - First-in first-out ordering of pending URLs
//! - The seen-set that guarantees a URL is processed at most once per run
//!
//! URLs are compared as raw strings. `http://x.org/a` and `http://x.org/a/`
//! are distinct entries.

use std::collections::{HashSet, VecDeque};

/// Pending URLs plus the set of URLs already taken for processing
///
/// A URL is marked seen when it is dequeued, before any network activity.
/// The same URL may sit in the queue more than once if it was discovered
/// again before its first copy was dequeued; later copies are discarded by
/// [`Frontier::next_unseen`].
#[derive(Debug, Default)]
pub struct Frontier {
    /// Pending URLs in arrival order
    queue: VecDeque<String>,

    /// URLs already dequeued; only ever grows
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding the given start URLs in order
    pub fn with_start_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: urls.into_iter().map(Into::into).collect(),
            seen: HashSet::new(),
        }
    }

    /// Appends a URL to the back of the queue
    pub fn push(&mut self, url: String) {
        tracing::trace!("Enqueued {}", url);
        self.queue.push_back(url);
    }

    /// Appends a URL unless it was already dequeued
    ///
    /// Returns true if the URL was enqueued.
    pub fn push_if_unseen(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.push(url);
        true
    }

    /// Pops URLs until one that was never seen is found, marking it seen
    ///
    /// Returns `None` once the queue is exhausted.
    pub fn next_unseen(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            if self.seen.insert(url.clone()) {
                return Some(url);
            }
            tracing::trace!("Skipping already seen {}", url);
        }
        None
    }

    /// Returns whether a URL has already been dequeued
    pub fn is_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Number of entries waiting in the queue (duplicates included)
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs dequeued so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
