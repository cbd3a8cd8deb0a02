use url::Url;

/// Extracts the lowercase host from a URL string
///
/// Ports are not part of the host, so `http://example.org:8080/` yields
/// `example.org`. Returns `None` for unparseable or host-less URLs.
///
/// # Examples
///
/// ```
/// use legal_corpus_collector::url::extract_domain;
///
/// assert_eq!(extract_domain("https://EXAMPLE.org/path"), Some("example.org".to_string()));
/// assert_eq!(extract_domain("mailto:someone@example.org"), None);
/// ```
pub fn extract_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|h| h.to_lowercase())
}
