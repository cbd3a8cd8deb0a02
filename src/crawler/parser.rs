//! HTML parser for extracting outbound links
//!
//! Parsing is tolerant: html5ever recovers from malformed markup, and anchors
//! whose `href` cannot be resolved are skipped rather than aborting the page.

use crate::url::resolve_link;
use scraper::{Html, Selector};

/// Extracts every resolvable `<a href>` target, in document order
///
/// # Link Extraction Rules
///
/// **Include:**
/// - every `<a>` element carrying an `href` attribute
///
/// **Exclude:**
/// - empty hrefs
/// - `javascript:` and `mailto:` links
/// - links that do not resolve to `http`/`https`
///
/// Duplicates are kept; the frontier decides what is new.
///
/// # Example
///
/// ```
/// use legal_corpus_collector::crawler::extract_links;
///
/// let html = r#"<html><body><a href="/acte.pdf">Acte</a></body></html>"#;
/// let links = extract_links(html, "https://example.org/index.html");
/// assert_eq!(links, vec!["https://example.org/acte.pdf".to_string()]);
/// ```
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(base_url, href) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}
