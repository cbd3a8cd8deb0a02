//! Integration tests for the collector
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! probe, download, manifest cycle end-to-end against a temporary output root.

use legal_corpus_collector::config::{CrawlOptions, Seed, UserAgentConfig};
use legal_corpus_collector::crawler::{crawl_seed, HttpFetcher};
use legal_corpus_collector::output::{read_manifest, verify_manifest, StopReason};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const PDF_BODY: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

/// Creates options writing below `dir` with no politeness delay
fn test_options(dir: &TempDir, max_pages: u32) -> CrawlOptions {
    CrawlOptions {
        output_root: dir.path().to_path_buf(),
        max_pages,
        delay: Duration::ZERO,
        fetch_timeout: Duration::from_secs(5),
        probe_timeout: Duration::from_secs(5),
        user_agent: UserAgentConfig {
            crawler_name: "TestCollector".to_string(),
            crawler_version: "1.0".to_string(),
            contact: "test@example.org".to_string(),
        },
    }
}

/// Creates a seed restricted to the mock server's host
fn test_seed(server: &MockServer, start_paths: &[&str]) -> Seed {
    Seed {
        name: "ohada".to_string(),
        start_urls: start_paths
            .iter()
            .map(|p| format!("{}{}", server.uri(), p))
            .collect(),
        allowed_domains: vec!["127.0.0.1".to_string()],
    }
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

async fn mount_pdf(server: &MockServer, route: &str, body: &'static [u8]) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/pdf"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/pdf"))
        .mount(server)
        .await;
}

/// Requests received for `route`, all methods
async fn requests_for(server: &MockServer, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == route)
        .collect()
}

async fn gets_for(server: &MockServer, route: &str) -> usize {
    requests_for(server, route)
        .await
        .iter()
        .filter(|r| r.method.to_string() == "GET")
        .count()
}

fn page(links: &[String]) -> String {
    let anchors: Vec<String> = links
        .iter()
        .map(|l| format!(r#"<li><a href="{}">{}</a></li>"#, l, l))
        .collect();
    format!(
        "<html><head><title>Docs</title></head><body><ul>{}</ul></body></html>",
        anchors.join("\n")
    )
}

#[tokio::test]
async fn test_in_domain_pdf_downloaded_and_off_domain_link_ignored() {
    let server = MockServer::start().await;
    let port = server.address().port();
    let dir = TempDir::new().unwrap();

    // Same server under another host name: outside the allow-list
    let off_domain = format!("http://localhost:{}/x.pdf", port);
    mount_html(
        &server,
        "/docs.html",
        page(&["report.pdf".to_string(), off_domain]),
    )
    .await;
    mount_pdf(&server, "/report.pdf", PDF_BODY).await;
    mount_pdf(&server, "/x.pdf", PDF_BODY).await;

    let seed = test_seed(&server, &["/docs.html"]);
    let options = test_options(&dir, 800);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();

    assert_eq!(stats.pdfs_downloaded, 1);
    assert_eq!(stats.pages_visited, 1);
    assert!(requests_for(&server, "/x.pdf").await.is_empty());

    let records = read_manifest(&options.manifest_path(&seed)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, format!("{}/report.pdf", server.uri()));
    assert_eq!(records[0].seed, "ohada");
    assert_eq!(records[0].content_type, "application/pdf");
    assert_eq!(records[0].bytes, PDF_BODY.len() as u64);
    assert!(Path::new(&records[0].path).ends_with("ohada/report.pdf"));
    assert_eq!(std::fs::read(&records[0].path).unwrap(), PDF_BODY);
}

#[tokio::test]
async fn test_direct_pdf_start_url_skips_html_path() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_pdf(&server, "/file.pdf", PDF_BODY).await;

    let seed = test_seed(&server, &["/file.pdf"]);
    let options = test_options(&dir, 800);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();

    assert_eq!(stats.pages_visited, 0);
    assert_eq!(stats.pdfs_downloaded, 1);
    assert_eq!(gets_for(&server, "/file.pdf").await, 1);
    assert_eq!(read_manifest(&options.manifest_path(&seed)).unwrap().len(), 1);
}

#[tokio::test]
async fn test_page_budget_leaves_links_unvisited() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let links: Vec<String> = (1..=5).map(|i| format!("/doc{}.pdf", i)).collect();
    mount_html(&server, "/", page(&links)).await;
    for link in &links {
        mount_pdf(&server, link, PDF_BODY).await;
    }

    let seed = test_seed(&server, &["/"]);
    let options = test_options(&dir, 1);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();

    assert_eq!(stats.pages_visited, 1);
    assert_eq!(stats.pdfs_downloaded, 0);
    assert_eq!(stats.frontier_remaining, 5);
    assert_eq!(stats.stop_reason, StopReason::PageBudgetReached);
    for link in &links {
        assert!(requests_for(&server, link).await.is_empty());
    }
}

#[tokio::test]
async fn test_server_error_does_not_stop_crawl() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_pdf(&server, "/after.pdf", PDF_BODY).await;

    let seed = test_seed(&server, &["/broken", "/after.pdf"]);
    let options = test_options(&dir, 800);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();

    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(stats.pdfs_downloaded, 1);

    let records = read_manifest(&options.manifest_path(&seed)).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].url.ends_with("/after.pdf"));
}

#[tokio::test]
async fn test_slow_page_times_out_and_crawl_continues() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html></html>", "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    mount_pdf(&server, "/fast.pdf", PDF_BODY).await;

    let seed = test_seed(&server, &["/slow", "/fast.pdf"]);
    let mut options = test_options(&dir, 800);
    options.fetch_timeout = Duration::from_millis(500);
    options.probe_timeout = Duration::from_millis(500);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();

    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(stats.pdfs_downloaded, 1);
}

#[tokio::test]
async fn test_each_url_fetched_at_most_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let base = server.uri();
    mount_html(
        &server,
        "/a",
        page(&[
            "/b".to_string(),
            format!("{}/a", base),
            "/shared.pdf".to_string(),
        ]),
    )
    .await;
    mount_html(
        &server,
        "/b",
        page(&["/a".to_string(), "/b".to_string(), "/shared.pdf".to_string()]),
    )
    .await;
    mount_pdf(&server, "/shared.pdf", PDF_BODY).await;

    let seed = test_seed(&server, &["/a", "/b"]);
    let options = test_options(&dir, 800);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();

    assert_eq!(stats.pages_visited, 2);
    assert_eq!(stats.pdfs_downloaded, 1);
    assert_eq!(stats.stop_reason, StopReason::FrontierExhausted);
    for route in ["/a", "/b", "/shared.pdf"] {
        assert_eq!(gets_for(&server, route).await, 1, "GET count for {}", route);
    }
}

#[tokio::test]
async fn test_probe_without_content_type_falls_back_to_extension() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    // HEAD is not mounted: the probe sees a bare 404
    Mock::given(method("GET"))
        .and(path("/Acte(1).pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PDF_BODY, "application/pdf"))
        .mount(&server)
        .await;

    let seed = test_seed(&server, &["/Acte(1).pdf"]);
    let options = test_options(&dir, 800);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();

    assert_eq!(stats.pdfs_downloaded, 1);
    let records = read_manifest(&options.manifest_path(&seed)).unwrap();
    assert!(Path::new(&records[0].path).ends_with("Acte_1_.pdf"));
}

#[tokio::test]
async fn test_pdf_announced_by_probe_but_served_as_html() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("HEAD"))
        .and(path("/viewer"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/pdf"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/viewer"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page(&["/real.pdf".to_string()]), "text/html"),
        )
        .mount(&server)
        .await;
    mount_pdf(&server, "/real.pdf", PDF_BODY).await;

    let seed = test_seed(&server, &["/viewer"]);
    let options = test_options(&dir, 800);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();

    assert_eq!(stats.classification_mismatches, 1);
    assert_eq!(stats.pages_visited, 1);
    assert_eq!(stats.pdfs_downloaded, 1);
    assert_eq!(gets_for(&server, "/viewer").await, 1);
    assert!(!dir.path().join("ohada").join("viewer.pdf").exists());
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/ua.pdf"))
        .and(header(
            "user-agent",
            "TestCollector/1.0 (+contact: test@example.org)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PDF_BODY, "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let seed = test_seed(&server, &["/ua.pdf"]);
    let options = test_options(&dir, 800);
    let fetcher = HttpFetcher::new(&options).unwrap();

    let stats = crawl_seed(&fetcher, &seed, &options).await.unwrap();
    assert_eq!(stats.pdfs_downloaded, 1);
}

#[tokio::test]
async fn test_manifest_digests_verify_and_append_across_runs() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_html(
        &server,
        "/",
        page(&["/one.pdf".to_string(), "/two.pdf".to_string()]),
    )
    .await;
    mount_pdf(&server, "/one.pdf", b"first document").await;
    mount_pdf(&server, "/two.pdf", b"second document").await;

    let seed = test_seed(&server, &["/"]);
    let options = test_options(&dir, 800);
    let fetcher = HttpFetcher::new(&options).unwrap();

    crawl_seed(&fetcher, &seed, &options).await.unwrap();
    let manifest = options.manifest_path(&seed);
    let report = verify_manifest(&manifest).unwrap();
    assert_eq!(report.checked, 2);
    assert!(report.is_clean());

    // A second run re-downloads and appends; earlier lines stay intact
    crawl_seed(&fetcher, &seed, &options).await.unwrap();
    let records = read_manifest(&manifest).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].sha256, records[2].sha256);
    assert!(verify_manifest(&manifest).unwrap().is_clean());

    std::fs::write(&records[0].path, b"tampered").unwrap();
    let report = verify_manifest(&manifest).unwrap();
    assert_eq!(report.mismatched.len(), 2);
}
