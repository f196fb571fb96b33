//! Integration tests for sitemap-check
//!
//! These tests use wiremock to serve a small site and exercise the HTTP
//! fetcher, sitemap discovery and full batches end-to-end.

use sitemap_check::checks::{CheckRegistry, Classification};
use sitemap_check::config::{Config, FetcherConfig, ReportFormat};
use sitemap_check::crawler::{Concurrent, Executor, Fetcher, HttpFetcher, Pipeline, Sequential, Shutdown};
use sitemap_check::output::{render_report, summarize, BatchSummary, ReportContext};
use sitemap_check::sitemap::{collect_url_records, SitemapSource, UrlRecord, XmlSitemapSource};
use sitemap_check::SitemapError;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOOD_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Home</title>
<meta name="description" content="The home page">
<meta name="viewport" content="width=device-width">
<meta name="theme-color" content="#336699">
<link rel="canonical" href="https://example.com/">
</head>
<body><a rel="home" href="/">Home</a></body>
</html>"##;

fn urlset(locs: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for loc in locs {
        xml.push_str(&format!("<url><loc>{}</loc></url>", loc));
    }
    xml.push_str("</urlset>");
    xml
}

fn sitemap_index(locs: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for loc in locs {
        xml.push_str(&format!("<sitemap><loc>{}</loc></sitemap>", loc));
    }
    xml.push_str("</sitemapindex>");
    xml
}

async fn mount_xml(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

fn test_config(base_url: &str) -> Config {
    let mut config = Config::for_site(base_url);
    config.fetcher = FetcherConfig {
        timeout_secs: 5,
        user_agent: "sitemap-check-test".to_string(),
    };
    config
}

#[tokio::test]
async fn test_fetcher_returns_status_headers_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/about/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(GOOD_PAGE)
                .insert_header("content-type", "text/html")
                .insert_header("X-Frame-Options", "SAMEORIGIN"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&mock_server.uri(), &FetcherConfig::default()).unwrap();
    let response = fetcher.fetch("/about/").await.unwrap();

    assert_eq!(response.path, "/about/");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.header("x-frame-options"), Some("SAMEORIGIN"));
    assert!(response.text().contains("<title>Home</title>"));
}

#[tokio::test]
async fn test_fetcher_does_not_follow_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new/"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GOOD_PAGE))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&mock_server.uri(), &FetcherConfig::default()).unwrap();
    let response = fetcher.fetch("/old/").await.unwrap();

    assert_eq!(response.status_code, 301);
    assert_eq!(response.header("location"), Some("/new/"));
}

#[tokio::test]
async fn test_fetcher_error_status_is_a_response() {
    let mock_server = MockServer::start().await;

    let fetcher = HttpFetcher::from_config(&mock_server.uri(), &FetcherConfig::default()).unwrap();
    let response = fetcher.fetch("/missing/").await.unwrap();

    assert_eq!(response.status_code, 404);
}

#[tokio::test]
async fn test_sitemap_discovered_from_robots_and_index_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /admin/\nSitemap: {}/sitemap_index.xml\n",
            base_url
        )))
        .mount(&mock_server)
        .await;

    mount_xml(
        &mock_server,
        "/sitemap_index.xml",
        sitemap_index(&[
            format!("{}/pages.xml", base_url),
            "/posts.xml".to_string(),
            format!("{}/pages.xml", base_url),
        ]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/pages.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[
            format!("{}/", base_url),
            format!("{}/about/", base_url),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_xml(
        &mock_server,
        "/posts.xml",
        urlset(&[format!("{}/posts/first/", base_url)]),
    )
    .await;

    let source = XmlSitemapSource::from_config(&test_config(&base_url)).unwrap();
    let records = collect_url_records(&source).await.unwrap();

    let paths: Vec<String> = records.iter().map(|r| r.request_path().unwrap()).collect();
    assert_eq!(paths, vec!["/", "/about/", "/posts/first/"]);
}

#[tokio::test]
async fn test_sitemap_falls_back_to_default_location() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // No robots.txt mounted: wiremock answers 404
    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&[format!("{}/only/", base_url)]),
    )
    .await;

    let source = XmlSitemapSource::from_config(&test_config(&base_url)).unwrap();
    let records = collect_url_records(&source).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].request_path().unwrap(), "/only/");
}

#[tokio::test]
async fn test_configured_sitemap_url_skips_discovery() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Sitemap: /wrong.xml\n"))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_xml(
        &mock_server,
        "/custom.xml",
        urlset(&[format!("{}/a/", base_url)]),
    )
    .await;

    let mut config = test_config(&base_url);
    config.site.sitemap_url = Some(format!("{}/custom.xml", base_url));
    let source = XmlSitemapSource::from_config(&config).unwrap();

    assert_eq!(collect_url_records(&source).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sitemap_errors_are_fatal() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/broken.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_xml(&mock_server, "/garbage.xml", "<html>oops</html>".to_string()).await;
    mount_xml(&mock_server, "/empty.xml", urlset(&[])).await;

    let source_for = |location: &str| {
        let mut config = test_config(&base_url);
        config.site.sitemap_url = Some(format!("{}{}", base_url, location));
        XmlSitemapSource::from_config(&config).unwrap()
    };

    let result = collect_url_records(&source_for("/broken.xml")).await;
    assert!(matches!(result, Err(SitemapError::Status { status: 500, .. })));

    let result = collect_url_records(&source_for("/garbage.xml")).await;
    assert!(matches!(result, Err(SitemapError::Malformed { .. })));

    let result = collect_url_records(&source_for("/empty.xml")).await;
    assert!(matches!(result, Err(SitemapError::Empty(_))));
}

#[tokio::test]
async fn test_deeply_nested_index_is_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    for level in 0..4 {
        mount_xml(
            &mock_server,
            &format!("/index-{}.xml", level),
            sitemap_index(&[format!("{}/index-{}.xml", base_url, level + 1)]),
        )
        .await;
    }

    Mock::given(method("GET"))
        .and(path("/index-4.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[format!(
            "{}/deep/",
            base_url
        )])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&base_url);
    config.site.sitemap_url = Some(format!("{}/index-0.xml", base_url));
    let source = XmlSitemapSource::from_config(&config).unwrap();

    assert!(source.entries().await.unwrap().is_empty());
}

/// Serves a small site and returns the records to check
async fn mount_site(server: &MockServer) -> Vec<UrlRecord> {
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(GOOD_PAGE)
                .insert_header("content-type", "text/html")
                .insert_header("X-Frame-Options", "DENY")
                .insert_header("X-Content-Type-Options", "nosniff"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/moved/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bare/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
        .mount(server)
        .await;

    vec![
        UrlRecord::new(format!("{}/", base_url)),
        UrlRecord::new(format!("{}/moved/", base_url)),
        UrlRecord::new(format!("{}/gone/", base_url)),
        UrlRecord::new("/bare/"),
        UrlRecord::new("http://[broken"),
    ]
}

fn pipeline_for(server: &MockServer) -> Pipeline {
    let fetcher = HttpFetcher::from_config(&server.uri(), &test_config(&server.uri()).fetcher)
        .unwrap();
    Pipeline::new(Arc::new(fetcher), Arc::new(CheckRegistry::builtin()))
}

fn status_classification(summary: &BatchSummary, page_path: &str) -> Option<Classification> {
    summary
        .page_results
        .iter()
        .find(|p| p.path == page_path)
        .and_then(|p| p.check_results().iter().find(|r| r.check_name == "Status code"))
        .map(|r| r.classification)
}

#[tokio::test]
async fn test_sequential_batch_end_to_end() {
    let mock_server = MockServer::start().await;
    let records = mount_site(&mock_server).await;
    let total = records.len();

    let execution = Sequential
        .execute(&pipeline_for(&mock_server), records, &Shutdown::new())
        .await;
    assert!(!execution.cancelled);

    let summary = summarize(execution.page_results);
    assert_eq!(summary.page_count(), total);
    assert_eq!(summary.fetch_failure_count, 1);
    assert_eq!(status_classification(&summary, "/"), Some(Classification::Success));
    assert_eq!(status_classification(&summary, "/moved/"), Some(Classification::Warning));
    assert_eq!(status_classification(&summary, "/gone/"), Some(Classification::Error));
    assert_eq!(status_classification(&summary, "/bare/"), Some(Classification::Success));
    assert!(summary.error_count > 0);
    assert!(!summary.is_success());
    assert_eq!(summary.exit_code(), summary.error_count);
    assert_eq!(
        summary.failure_count(),
        summary.error_count + summary.fetch_failure_count
    );

    let every_page_ran_every_check = summary
        .page_results
        .iter()
        .filter(|p| !p.is_fetch_failure())
        .all(|p| p.check_results().len() == CheckRegistry::builtin().len());
    assert!(every_page_ran_every_check);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_batch_matches_sequential() {
    let mock_server = MockServer::start().await;
    let records = mount_site(&mock_server).await;
    let pipeline = pipeline_for(&mock_server);

    let sequential = summarize(
        Sequential
            .execute(&pipeline, records.clone(), &Shutdown::new())
            .await
            .page_results,
    );
    let concurrent = summarize(
        Concurrent::new(3)
            .execute(&pipeline, records, &Shutdown::new())
            .await
            .page_results,
    );

    assert_eq!(sequential.error_count, concurrent.error_count);
    assert_eq!(sequential.warning_count, concurrent.warning_count);
    assert_eq!(sequential.info_count, concurrent.info_count);
    assert_eq!(sequential.success_count, concurrent.success_count);
    assert_eq!(sequential.fetch_failure_count, concurrent.fetch_failure_count);
    assert_eq!(sequential.sorted_by_path(), concurrent.sorted_by_path());
}

#[tokio::test]
async fn test_batch_report_written() {
    let mock_server = MockServer::start().await;
    let records = mount_site(&mock_server).await;

    let execution = Sequential
        .execute(&pipeline_for(&mock_server), records, &Shutdown::new())
        .await;
    let summary = summarize(execution.page_results);

    let temp_dir = tempfile::TempDir::new().unwrap();
    let report_path = temp_dir.path().join("sitemapcheck_report.md");
    let context = ReportContext::new(mock_server.uri()).with_config_hash("0123abcd");
    render_report(&summary, &context, ReportFormat::Markdown, &report_path).unwrap();

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("- **Config Hash**: 0123abcd"));
    assert!(report.contains("### /gone/ (HTTP 404)"));
    assert!(report.contains("### /moved/ (HTTP 301)"));
    assert!(report.contains("(fetch failed)"));
}
