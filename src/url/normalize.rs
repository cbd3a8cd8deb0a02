use url::Url;

/// Resolves a raw hyperlink against the page it was found on
///
/// # Resolution Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Empty links yield `None`
/// 3. `javascript:` and `mailto:` links yield `None`
/// 4. Everything else is resolved with standard relative-URL resolution
/// 5. Results that are not `http`/`https` yield `None`
///
/// No canonicalization happens here: fragments, trailing slashes and query
/// parameter order are kept exactly as resolved. Deduplication is done on the
/// resulting string.
///
/// # Examples
///
/// ```
/// use legal_corpus_collector::url::resolve_link;
///
/// assert_eq!(
///     resolve_link("http://example.org/lois/index.html", "../actes/traite.pdf"),
///     Some("http://example.org/actes/traite.pdf".to_string())
/// );
/// assert_eq!(resolve_link("http://example.org/", "javascript:void(0)"), None);
/// ```
pub fn resolve_link(base: &str, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:") || lowered.starts_with("mailto:") {
        return None;
    }

    let base = Url::parse(base).ok()?;
    let absolute = base.join(href).ok()?;

    match absolute.scheme() {
        "http" | "https" => Some(absolute.to_string()),
        _ => None,
    }
}
