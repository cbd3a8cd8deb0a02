//! Content-type sniffing for PDF and HTML resources

use url::Url;

const PDF_EXTENSION: &str = ".pdf";
const PDF_MIME: &str = "application/pdf";
const HTML_MIME: &str = "text/html";

/// Decides whether a resource is a PDF
///
/// True when the URL's path or query ends with `.pdf` (ignoring case), or
/// when the content type mentions `application/pdf` (ignoring case). The
/// fragment is not part of the decision.
///
/// # Examples
///
/// ```
/// use legal_corpus_collector::crawler::looks_like_pdf;
///
/// assert!(looks_like_pdf("https://example.org/acte.PDF", None));
/// assert!(looks_like_pdf("https://example.org/get?file=acte.pdf", None));
/// assert!(looks_like_pdf("https://example.org/download/42", Some("application/pdf")));
/// assert!(!looks_like_pdf("https://example.org/index.html", Some("text/html")));
/// ```
pub fn looks_like_pdf(url: &str, content_type: Option<&str>) -> bool {
    url_has_pdf_extension(url) || content_type.map_or(false, is_pdf_content_type)
}

/// True when the content type mentions `application/pdf`
pub fn is_pdf_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(PDF_MIME)
}

/// True when the content type mentions `text/html`
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(HTML_MIME)
}

fn url_has_pdf_extension(url: &str) -> bool {
    let ends_with_pdf = |s: &str| s.to_ascii_lowercase().ends_with(PDF_EXTENSION);

    match Url::parse(url) {
        Ok(parsed) => ends_with_pdf(parsed.path()) || parsed.query().map_or(false, ends_with_pdf),
        // Unparseable input: judge the raw string without its fragment
        Err(_) => ends_with_pdf(url.split('#').next().unwrap_or(url)),
    }
}
