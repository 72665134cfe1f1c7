//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock news sites and run the full
//! crawl cycle end-to-end against them.

use corpus_crawler::config::{Config, CrawlerConfig, OutputConfig, SiteEntry, UserAgentConfig};
use corpus_crawler::crawler::{run_crawl, CrawlOptions};
use corpus_crawler::output::CrawlReport;
use corpus_crawler::state::PageOutcome;
use corpus_crawler::{CorpusError, OutputError};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DETAIL_1: &str = "/2025/0612/c_1130000001-first-detail-article.htm";
const DETAIL_2: &str = "/2025/0612/c_1130000002-second-detail-article.htm";
const DETAIL_3: &str = "/2025/0612/c_1130000003-third-detail-article.htm";
const OFF_DOMAIN: &str = "https://other-domain.com/2025/0612/c_1130000009-off-domain.htm";

/// Creates a single-site test configuration for the given mock server
fn create_test_config(base_url: &str, output_dir: &Path, max_pages: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            delay_seconds: 0.0,
            request_timeout_seconds: 5,
            parallel_sites: false,
        },
        user_agent: UserAgentConfig::default(),
        output: OutputConfig {
            directory: output_dir.display().to_string(),
            summary_path: None,
        },
        sites: vec![site_entry("mock", base_url)],
    }
}

fn site_entry(name: &str, base_url: &str) -> SiteEntry {
    SiteEntry {
        name: name.to_string(),
        seed: format!("{}/", base_url),
        allow_prefixes: vec![format!("{}/", base_url)],
        output_prefix: Some(format!("{}_news", name)),
        output_subdir: None,
        year_marker: Some("/2025".to_string()),
        min_url_length: 50,
        content_selector: None,
        fallback_encoding: None,
        max_pages: None,
    }
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn index_page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>Index</title></head><body><nav>{}</nav></body></html>",
        anchors
    )
}

fn detail_page(title: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>\n", p))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_response(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

async fn crawl_single(config: &Config) -> CrawlReport {
    let mut reports = run_crawl(config, &CrawlOptions::default())
        .await
        .expect("Crawl failed");
    assert_eq!(reports.len(), 1);
    reports.remove(0)
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).expect("Failed to read corpus file")
}

#[tokio::test]
async fn test_page_budget_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (compatible; AcademicCrawler/1.0)",
        ))
        .respond_with(html_response(index_page(&[
            DETAIL_1, DETAIL_2, OFF_DOMAIN, DETAIL_3,
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, DETAIL_1, detail_page("One", &["First story."]), 1).await;
    mount_page(&mock_server, DETAIL_2, detail_page("Two", &["Second story."]), 1).await;
    mount_page(&mock_server, DETAIL_3, detail_page("Three", &["Third story."]), 0).await;

    let out = TempDir::new().unwrap();
    let config = create_test_config(&base_url, out.path(), 2);
    let report = crawl_single(&config).await;

    let site_dir = out.path().join("mock");
    assert_eq!(report.directory, site_dir);
    assert_eq!(report.entries.len(), 2);
    assert_eq!(read(&site_dir, "mock_news_1.txt"), "One First story.");
    assert_eq!(read(&site_dir, "mock_news_2.txt"), "Two Second story.");
    assert!(!site_dir.join("mock_news_3.txt").exists());

    // Off-domain link is filtered before it reaches the frontier
    assert_eq!(report.stats.links_discovered, 3);
    assert_eq!(report.stats.pages_saved(), 2);
    assert_eq!(report.stats.urls_processed, 3);
}

#[tokio::test]
async fn test_each_url_fetched_at_most_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", index_page(&["/world/", DETAIL_1, "/"]), 1).await;
    mount_page(
        &mock_server,
        "/world/",
        index_page(&["/", DETAIL_1, "/world/", DETAIL_2]),
        1,
    )
    .await;
    mount_page(&mock_server, DETAIL_1, detail_page("One", &["Story one."]), 1).await;
    mount_page(&mock_server, DETAIL_2, detail_page("Two", &["Story two."]), 1).await;

    let out = TempDir::new().unwrap();
    let config = create_test_config(&base_url, out.path(), 100);
    let report = crawl_single(&config).await;

    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.stats.urls_processed, 4);
    assert_eq!(report.stats.index_pages, 2);
    assert_eq!(report.stats.detail_pages, 2);
    assert!(report.stats.duplicates_skipped >= 3);

    // Breadth-first: the article linked from the seed is saved first
    assert_eq!(report.entries[0].url, format!("{}{}", base_url, DETAIL_1));
    assert_eq!(report.entries[1].url, format!("{}{}", base_url, DETAIL_2));
}

#[tokio::test]
async fn test_empty_articles_do_not_consume_ordinals() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        index_page(&[DETAIL_1, DETAIL_2, DETAIL_3]),
        1,
    )
    .await;
    mount_page(&mock_server, DETAIL_1, detail_page("Gallery", &["", "  "]), 1).await;
    mount_page(&mock_server, DETAIL_2, detail_page("Two", &["Story two."]), 1).await;
    mount_page(&mock_server, DETAIL_3, detail_page("Three", &["Story three."]), 1).await;

    let out = TempDir::new().unwrap();
    let config = create_test_config(&base_url, out.path(), 10);
    let report = crawl_single(&config).await;

    let ordinals: Vec<usize> = report.entries.iter().map(|e| e.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2]);
    assert_eq!(report.stats.count(PageOutcome::EmptyContent), 1);

    let site_dir = out.path().join("mock");
    assert_eq!(read(&site_dir, "mock_news_1.txt"), "Two Story two.");
    assert_eq!(read(&site_dir, "mock_news_2.txt"), "Three Story three.");
    assert_eq!(std::fs::read_dir(&site_dir).unwrap().count(), 2);
}

#[tokio::test]
async fn test_error_status_pages_are_still_processed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        index_page(&["/broken/", DETAIL_1, DETAIL_2]),
        1,
    )
    .await;

    // A listing served with 500 still yields its links
    Mock::given(method("GET"))
        .and(path("/broken/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(index_page(&[DETAIL_3]))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(DETAIL_1))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(detail_page("Gone", &["Article body served with 404."]))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, DETAIL_2, detail_page("Two", &["Story two."]), 1).await;
    mount_page(&mock_server, DETAIL_3, detail_page("Three", &["Story three."]), 1).await;

    let out = TempDir::new().unwrap();
    let config = create_test_config(&base_url, out.path(), 10);
    let report = crawl_single(&config).await;

    let site_dir = out.path().join("mock");
    assert_eq!(report.entries.len(), 3);
    assert_eq!(
        read(&site_dir, "mock_news_1.txt"),
        "Gone Article body served with 404."
    );
    assert_eq!(read(&site_dir, "mock_news_2.txt"), "Two Story two.");
    assert_eq!(read(&site_dir, "mock_news_3.txt"), "Three Story three.");

    assert_eq!(report.stats.error_responses(), 2);
    assert_eq!(report.stats.error_statuses.get(&404), Some(&1));
    assert_eq!(report.stats.error_statuses.get(&500), Some(&1));
    assert_eq!(report.stats.fetch_failures(), 0);
}

#[tokio::test]
async fn test_network_failures_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", index_page(&[DETAIL_1, DETAIL_2]), 1).await;

    // The first article answers too slowly for the client timeout
    Mock::given(method("GET"))
        .and(path(DETAIL_1))
        .respond_with(
            html_response(detail_page("Slow", &["Never read."]))
                .set_delay(std::time::Duration::from_secs(8)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, DETAIL_2, detail_page("Two", &["Story two."]), 1).await;

    let out = TempDir::new().unwrap();
    let config = create_test_config(&base_url, out.path(), 10);
    let report = crawl_single(&config).await;

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].ordinal, 1);
    assert_eq!(report.stats.count(PageOutcome::Unreachable), 1);
    assert_eq!(report.stats.fetch_failures(), 1);
    assert_eq!(
        read(&out.path().join("mock"), "mock_news_1.txt"),
        "Two Story two."
    );
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_corpus() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", index_page(&["/a/", "/b/"]), 2).await;
    mount_page(&mock_server, "/a/", index_page(&[DETAIL_2, DETAIL_1]), 2).await;
    mount_page(&mock_server, "/b/", index_page(&[DETAIL_3, DETAIL_1]), 2).await;
    mount_page(&mock_server, DETAIL_1, detail_page("One", &["a", "b"]), 2).await;
    mount_page(&mock_server, DETAIL_2, detail_page("Two", &["c"]), 2).await;
    mount_page(&mock_server, DETAIL_3, detail_page("Three", &["d"]), 2).await;

    let first_out = TempDir::new().unwrap();
    let second_out = TempDir::new().unwrap();

    let first = crawl_single(&create_test_config(&base_url, first_out.path(), 10)).await;
    let second = crawl_single(&create_test_config(&base_url, second_out.path(), 10)).await;

    let texts = |report: &CrawlReport| -> Vec<(usize, String, String)> {
        report
            .entries
            .iter()
            .map(|e| (e.ordinal, e.url.clone(), e.text.clone()))
            .collect()
    };

    assert_eq!(first.entries.len(), 3);
    assert_eq!(texts(&first), texts(&second));
    assert_eq!(first.entries[0].text, "Two c");

    for entry in &first.entries {
        let name = entry.path.file_name().unwrap();
        let other = second_out.path().join("mock").join(name);
        assert_eq!(
            std::fs::read_to_string(&entry.path).unwrap(),
            std::fs::read_to_string(other).unwrap()
        );
    }
}

#[tokio::test]
async fn test_legacy_encoding_and_content_container() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", index_page(&[DETAIL_1]), 1).await;

    let html = "<html><head><meta charset=\"gbk\"><title>新华网</title></head><body>\
                <p>导航栏</p>\
                <div id=\"detail\"><p>第一段。</p><p>第二段。</p></div>\
                <p>版权所有</p></body></html>";
    let (bytes, _, _) = encoding_rs::GBK.encode(html);

    Mock::given(method("GET"))
        .and(path(DETAIL_1))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(bytes.into_owned())
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let out = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, out.path(), 10);
    config.sites[0].content_selector = Some("div#detail".to_string());

    let report = crawl_single(&config).await;

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].title, "新华网");
    assert_eq!(
        read(&out.path().join("mock"), "mock_news_1.txt"),
        "新华网 第一段。 第二段。"
    );
}

#[tokio::test]
async fn test_sites_crawl_independently_in_parallel() {
    let chinese = MockServer::start().await;
    let english = MockServer::start().await;

    mount_page(&chinese, "/", index_page(&[DETAIL_1]), 1).await;
    mount_page(&chinese, DETAIL_1, detail_page("中文", &["中文报道。"]), 1).await;
    mount_page(&english, "/", index_page(&[DETAIL_1, DETAIL_2]), 1).await;
    mount_page(&english, DETAIL_1, detail_page("English", &["Report one."]), 1).await;
    mount_page(&english, DETAIL_2, detail_page("English", &["Report two."]), 1).await;

    let out = TempDir::new().unwrap();
    let mut config = create_test_config(&chinese.uri(), out.path(), 10);
    config.sites = vec![
        site_entry("xinhua", &chinese.uri()),
        site_entry("english", &english.uri()),
    ];

    let options = CrawlOptions {
        sites: vec![],
        parallel: true,
    };
    let reports = run_crawl(&config, &options).await.expect("Crawl failed");

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].stats.site, "xinhua");
    assert_eq!(reports[0].entries.len(), 1);
    assert_eq!(reports[1].stats.site, "english");
    assert_eq!(reports[1].entries.len(), 2);

    assert_eq!(
        read(&out.path().join("xinhua"), "xinhua_news_1.txt"),
        "中文 中文报道。"
    );
    assert_eq!(
        read(&out.path().join("english"), "english_news_2.txt"),
        "English Report two."
    );
}

#[tokio::test]
async fn test_site_filter_runs_only_named_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", index_page(&[DETAIL_1]), 1).await;
    mount_page(&mock_server, DETAIL_1, detail_page("One", &["Story."]), 1).await;

    let out = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, out.path(), 10);
    config.sites.push(site_entry("unreached", "http://127.0.0.1:9"));

    let options = CrawlOptions {
        sites: vec!["mock".to_string()],
        parallel: false,
    };
    let reports = run_crawl(&config, &options).await.expect("Crawl failed");

    assert_eq!(reports.len(), 1);
    assert!(!out.path().join("unreached").exists());
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let out = TempDir::new().unwrap();
    let blocker = out.path().join("not-a-directory");
    std::fs::write(&blocker, "file in the way").unwrap();

    let config = create_test_config(&base_url, &blocker, 10);
    let result = run_crawl(&config, &CrawlOptions::default()).await;

    assert!(matches!(result, Err(CorpusError::Output(_))));
}

#[tokio::test]
async fn test_failed_save_mid_crawl_is_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", index_page(&[DETAIL_1, DETAIL_2]), 1).await;
    mount_page(&mock_server, DETAIL_1, detail_page("One", &["Story one."]), 1).await;
    mount_page(&mock_server, DETAIL_2, detail_page("Two", &["Story two."]), 0).await;

    let out = TempDir::new().unwrap();
    // A directory squatting on the first article's file name
    std::fs::create_dir_all(out.path().join("mock").join("mock_news_1.txt")).unwrap();

    let config = create_test_config(&base_url, out.path(), 10);
    let result = run_crawl(&config, &CrawlOptions::default()).await;

    assert!(matches!(
        result,
        Err(CorpusError::Output(OutputError::Write { .. }))
    ));
}

#[tokio::test]
async fn test_parallel_failure_aborts_other_sites() {
    let failing = MockServer::start().await;
    let slow = MockServer::start().await;

    mount_page(&failing, "/", index_page(&[DETAIL_1]), 1).await;
    mount_page(&failing, DETAIL_1, detail_page("One", &["Story one."]), 1).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(index_page(&[DETAIL_1, DETAIL_2])))
        .mount(&slow)
        .await;
    Mock::given(method("GET"))
        .and(path(DETAIL_1))
        .respond_with(
            html_response(detail_page("Late", &["Arrives after the abort."]))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&slow)
        .await;
    mount_page(&slow, DETAIL_2, detail_page("Never", &["Never fetched."]), 0).await;

    let out = TempDir::new().unwrap();
    std::fs::create_dir_all(out.path().join("broken").join("broken_news_1.txt")).unwrap();

    let mut config = create_test_config(&failing.uri(), out.path(), 10);
    config.sites = vec![
        site_entry("broken", &failing.uri()),
        site_entry("steady", &slow.uri()),
    ];

    let options = CrawlOptions {
        sites: vec![],
        parallel: true,
    };
    let result = run_crawl(&config, &options).await;
    assert!(matches!(result, Err(CorpusError::Output(_))));

    // Give an unaborted task time to finish its slow fetch and save
    tokio::time::sleep(std::time::Duration::from_secs(4)).await;
    assert!(!out.path().join("steady").join("steady_news_1.txt").exists());
}
