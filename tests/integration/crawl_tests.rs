//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the
//! full crawl cycle end-to-end over real HTTP.

use pagecrawl::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use pagecrawl::crawler::{run_crawl, Crawler, HttpFetcher};
use pagecrawl::output::{write_csv_report, REPORT_HEADER};
use pagecrawl::state::PageState;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `seed_url`
fn create_test_config(seed_url: &str, max_pages: usize, report_path: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed_url: seed_url.to_string(),
            max_concurrency: 3,
            max_pages,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
        },
        output: OutputConfig {
            report_path: report_path.to_string(),
        },
    }
}

/// Mounts an HTML page at `route`, expecting it to be requested `times` times
async fn mount_page(server: &MockServer, route: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

/// Canonical key of `route` on the mock server: `host:port` plus the path
fn key_for(server: &MockServer, route: &str) -> String {
    let host = server.uri().trim_start_matches("http://").to_string();
    format!("{}{}", host, route.trim_end_matches('/'))
}

/// A local port that was bound once and is closed again
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("No local address").port()
}

fn http_crawler(config: &Config) -> Crawler {
    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)
        .expect("Failed to build fetcher");
    Crawler::new(
        &config.crawler.seed_url,
        config.crawler.max_concurrency,
        Some(config.crawler.max_pages),
        Arc::new(fetcher),
    )
    .expect("Failed to create crawler")
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><body>
            <h1>Home</h1>
            <main><p>Welcome to the site</p></main>
            <a href="/a">A</a>
            <a href="https://other.example/x">External</a>
            <img src="/logo.png">
        </body></html>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/a",
        r#"<html><body><h1>Page A</h1><p>About A</p><a href="/">Home</a></body></html>"#,
        1,
    )
    .await;

    let config = create_test_config(&server.uri(), 100, "unused.csv");
    let outcome = run_crawl(&config).await.expect("Crawl failed");

    let root = key_for(&server, "/");
    let page_a = key_for(&server, "/a");

    assert_eq!(outcome.pages.len(), 2);

    let home = &outcome.pages[&root];
    assert_eq!(home.title, "Home");
    assert_eq!(home.summary, "Welcome to the site");
    assert_eq!(
        home.outgoing_links,
        vec![
            format!("{}/a", server.uri()),
            "https://other.example/x".to_string()
        ]
    );
    assert_eq!(home.image_urls, vec![format!("{}/logo.png", server.uri())]);

    let a = &outcome.pages[&page_a];
    assert_eq!(a.title, "Page A");
    assert_eq!(a.summary, "About A");

    assert_eq!(outcome.statistics.pages_recorded, 2);
    assert_eq!(outcome.statistics.rejected_out_of_scope, 1);
    assert!(outcome.statistics.rejected_duplicate >= 1);
}

#[tokio::test]
async fn test_failed_page_excluded_and_fetched_once() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><body><h1>Home</h1>
            <a href="/missing">Broken</a>
            <a href="/missing/">Broken again</a>
            <a href="/ok">Fine</a>
        </body></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/ok", "<html><body><h1>OK</h1></body></html>", 1).await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 100, "unused.csv");
    let crawler = http_crawler(&config);
    crawler.run().await;

    let missing = key_for(&server, "/missing");
    let pages = crawler.registry().snapshot();

    assert_eq!(pages.len(), 2);
    assert!(!pages.contains_key(&missing));
    assert_eq!(crawler.registry().state_of(&missing), Some(PageState::Failed));
    assert_eq!(crawler.statistics().pages_failed, 1);
    assert_eq!(crawler.outstanding(), 0);
}

#[tokio::test]
async fn test_non_html_response_is_a_failure() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/data.json">Data</a></body></html>"#,
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 100, "unused.csv");
    let outcome = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(outcome.pages.len(), 1);
    assert_eq!(outcome.statistics.pages_failed, 1);
}

#[tokio::test]
async fn test_max_pages_enforced() {
    let server = MockServer::start().await;

    let links: String = (1..=6)
        .map(|i| format!(r#"<a href="/p{}">P{}</a>"#, i, i))
        .collect();
    mount_page(
        &server,
        "/",
        &format!("<html><body><h1>Hub</h1>{}</body></html>", links),
        1,
    )
    .await;

    for i in 1..=6 {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                format!("<html><body><h1>P{}</h1></body></html>", i),
                "text/html",
            ))
            .mount(&server)
            .await;
    }

    let config = create_test_config(&server.uri(), 3, "unused.csv");
    let crawler = http_crawler(&config);
    crawler.run().await;

    assert_eq!(crawler.registry().len(), 3);
    assert_eq!(crawler.registry().snapshot().len(), 3);
    assert!(crawler
        .registry()
        .snapshot()
        .contains_key(&key_for(&server, "/")));

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_user_agent_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body><h1>Hi</h1></body></html>", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), 10, "unused.csv");
    let outcome = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(outcome.pages.len(), 1);
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_report() {
    let seed = format!("http://127.0.0.1:{}/", closed_port());
    let config = create_test_config(&seed, 10, "unused.csv");
    let outcome = run_crawl(&config).await.expect("Crawl failed");

    assert!(outcome.pages.is_empty());
    assert_eq!(outcome.statistics.pages_failed, 1);
}

#[tokio::test]
async fn test_crawl_then_write_report() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<html><body><h1>Home</h1><p>First, with a comma</p>
            <a href="/b">B</a><a href="/a">A</a></body></html>"#,
        1,
    )
    .await;
    mount_page(&server, "/a", "<html><body><h1>A</h1></body></html>", 1).await;
    mount_page(&server, "/b", "<html><body><h1>B</h1></body></html>", 1).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = dir.path().join("report.csv");

    let config = create_test_config(
        &server.uri(),
        100,
        report_path.to_str().expect("Non-UTF-8 temp path"),
    );
    let outcome = run_crawl(&config).await.expect("Crawl failed");
    write_csv_report(&outcome.pages, &report_path).expect("Failed to write report");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&report_path)
        .expect("Failed to open report");
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("Malformed report");

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].iter().collect::<Vec<_>>(), REPORT_HEADER.to_vec());

    let keys: Vec<&str> = rows[1..].iter().map(|r| &r[0]).collect();
    assert_eq!(
        keys,
        vec![
            key_for(&server, "/"),
            key_for(&server, "/a"),
            key_for(&server, "/b")
        ]
    );

    assert_eq!(&rows[1][1], "Home");
    assert_eq!(&rows[1][2], "First, with a comma");
    assert_eq!(
        &rows[1][3],
        format!("{}/b;{}/a", server.uri(), server.uri())
    );
}
