// Tests for crawl functionality

use sitemapper_core::CoreError;
use sitemapper_core::crawl::{CrawlOptions, execute_crawl, extract_url_path, generate_crawl_report};
use sitemapper_scanner::{CrawlOutcome, CrawlResult, ScanError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// URL Path Extraction Tests
// ============================================================================

#[test]
fn test_extract_url_path_root() {
    assert_eq!(extract_url_path("http://example.com/"), "/");
}

#[test]
fn test_extract_url_path_empty_path() {
    assert_eq!(extract_url_path("http://example.com"), "/");
}

#[test]
fn test_extract_url_path_nested() {
    assert_eq!(extract_url_path("http://example.com/api/v1/users"), "/api/v1/users");
}

#[test]
fn test_extract_url_path_with_query_and_fragment() {
    assert_eq!(extract_url_path("http://example.com/api?key=value#top"), "/api");
}

#[test]
fn test_extract_url_path_with_port() {
    assert_eq!(extract_url_path("http://example.com:8080/api"), "/api");
}

#[test]
fn test_extract_url_path_invalid_url() {
    let url = "not a valid url";
    // Should return original string for invalid URLs
    assert_eq!(extract_url_path(url), url);
}

// ============================================================================
// Report Tests
// ============================================================================

fn sample_outcome() -> CrawlOutcome {
    let mut home = CrawlResult::new("https://example.com/".to_string(), 0);
    home.status_code = Some(200);
    home.links_found = vec![
        "https://example.com/about".to_string(),
        "https://example.com/down".to_string(),
    ];

    let mut about = CrawlResult::new("https://example.com/about".to_string(), 1);
    about.status_code = Some(404);

    let down = CrawlResult::with_error(
        "https://example.com/down".to_string(),
        1,
        "connection refused".to_string(),
    );

    CrawlOutcome {
        visited: [&home, &about, &down].iter().map(|r| r.url.clone()).collect(),
        results: vec![home, about, down],
    }
}

#[test]
fn test_generate_crawl_report_summary() {
    let report = generate_crawl_report(&sample_outcome());

    assert!(report.contains("Pages discovered: 3"));
    assert!(report.contains("Failed fetches: 1"));
    assert!(report.contains("Links followed: 2"));
    assert!(report.contains("Deepest level: 1"));
}

#[test]
fn test_generate_crawl_report_sections() {
    let report = generate_crawl_report(&sample_outcome());

    assert!(report.contains("## Depth 0"));
    assert!(report.contains("## Depth 1"));
    assert!(report.contains("/about"));
    assert!(report.contains("404"));
    assert!(report.contains("## Failed"));
    assert!(report.contains("connection refused"));
}

#[test]
fn test_generate_crawl_report_no_failures_section_when_clean() {
    let mut home = CrawlResult::new("https://example.com/".to_string(), 0);
    home.status_code = Some(200);
    let outcome = CrawlOutcome {
        visited: HashSet::from(["https://example.com/".to_string()]),
        results: vec![home],
    };

    let report = generate_crawl_report(&outcome);
    assert!(!report.contains("## Failed"));
}

// ============================================================================
// Crawl Execution Tests
// ============================================================================

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.as_bytes(), "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_execute_crawl_stays_on_seed_origin() {
    let mock_server = MockServer::start().await;
    let seed = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<a href="/page1">Page 1</a><a href="{}/page3">Page 3</a><a href="https://external.com">External</a>"#,
            seed
        ),
    )
    .await;
    mount_page(&mock_server, "/page1", r#"<a href="/page2">Page 2</a>"#).await;
    mount_page(&mock_server, "/page2", r#"<a href="/">Home</a>"#).await;
    mount_page(&mock_server, "/page3", "").await;

    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();

    let options = CrawlOptions {
        url: seed.clone(),
        max_depth: 2,
        threads: 2,
        ..CrawlOptions::default()
    };
    let outcome = execute_crawl(
        options,
        Some(Arc::new(move |msg: String| messages_clone.lock().unwrap().push(msg))),
    )
    .await
    .unwrap();

    let expected: HashSet<String> = [
        seed.clone(),
        format!("{}/page1", seed),
        format!("{}/page2", seed),
        format!("{}/page3", seed),
    ]
    .into_iter()
    .collect();
    assert_eq!(outcome.visited, expected);

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|m| m.contains("Discovered 4 pages")));
}

#[tokio::test]
async fn test_execute_crawl_unreachable_seed() {
    let options = CrawlOptions {
        url: "http://127.0.0.1:1/".to_string(),
        max_depth: 1,
        timeout_secs: 2,
        ..CrawlOptions::default()
    };

    let result = execute_crawl(options, None).await;

    assert!(matches!(
        result,
        Err(CoreError::Scan(ScanError::SeedFetch { .. }))
    ));
}

#[tokio::test]
async fn test_execute_crawl_invalid_seed() {
    let options = CrawlOptions {
        url: "definitely not a url".to_string(),
        ..CrawlOptions::default()
    };

    let result = execute_crawl(options, None).await;

    assert!(matches!(result, Err(CoreError::Scan(ScanError::InvalidUrl(_)))));
}
