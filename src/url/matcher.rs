use super::domain::extract_domain;

/// Checks if a host equals a suffix or is a subdomain of it
///
/// `"example.org"` matches `"example.org"` and `"docs.example.org"`, but not
/// `"myexample.org"`. Comparison ignores ASCII case.
pub fn matches_suffix(suffix: &str, host: &str) -> bool {
    let suffix = suffix.to_ascii_lowercase();
    host == suffix || host.ends_with(&format!(".{}", suffix))
}

/// Decides whether a URL's host belongs to the allowed domain set
///
/// The scheme plays no part: `http` and `https` URLs on the same host are
/// treated identically. URLs without a host are never allowed.
///
/// # Examples
///
/// ```
/// use legal_corpus_collector::url::is_allowed;
///
/// let allowed = vec!["ohada.org".to_string()];
/// assert!(is_allowed("https://www.ohada.org/fr/actes", &allowed));
/// assert!(is_allowed("http://ohada.org/x.pdf", &allowed));
/// assert!(!is_allowed("https://notohada.org/", &allowed));
/// ```
pub fn is_allowed(url: &str, allowed_domains: &[String]) -> bool {
    match extract_domain(url) {
        Some(host) => allowed_domains
            .iter()
            .any(|suffix| matches_suffix(suffix, &host)),
        None => false,
    }
}
