//! Unit tests for the PyPI adapter

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::ClientConfig;

use super::*;

fn provider(base_url: String, cache: Option<Arc<QueryCache>>) -> PypiProvider {
    let mut provider = PypiProvider::new(HttpClient::new(&ClientConfig::default()).unwrap(), cache);
    provider.base_url = base_url;
    provider
}

fn search_page(entries: &[(&str, &str, &str)]) -> String {
    let mut page = String::from("<html><ul>");
    for (name, version, description) in entries {
        page.push_str(&format!(
            concat!(
                "<a class=\"package-snippet\" href=\"/project/{n}/\">",
                "<span class=\"package-snippet__name\">{n}</span> ",
                "<span class=\"package-snippet__version\">{v}</span>",
                "<p class=\"package-snippet__description\">{d}</p></a>"
            ),
            n = name,
            v = version,
            d = description
        ));
    }
    page.push_str("</ul></html>");
    page
}

#[tokio::test]
async fn info_maps_pypi_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/requests/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": {
                "name": "requests",
                "version": "2.31.0",
                "summary": "Python HTTP for Humans.",
                "author": "Kenneth Reitz",
                "home_page": "https://requests.readthedocs.io",
                "license": "Apache 2.0"
            },
            "releases": {"2.30.0": [], "2.31.0": []}
        })))
        .mount(&server)
        .await;

    let info = provider(server.uri(), None)
        .info("requests", None)
        .await
        .unwrap();

    assert_eq!(info.name, "requests");
    assert_eq!(info.version, "2.31.0");
    assert_eq!(info.description, "Python HTTP for Humans.");
    assert_eq!(info.license.as_deref(), Some("Apache 2.0"));
    assert_eq!(
        info.versions,
        Some(vec!["2.30.0".to_string(), "2.31.0".to_string()])
    );
}

#[tokio::test]
async fn info_with_version_hits_the_version_scoped_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/requests/2.30.0/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": {"name": "requests", "version": "2.30.0"},
            "releases": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = provider(server.uri(), None)
        .info("requests", Some("2.30.0"))
        .await
        .unwrap();
    assert_eq!(info.version, "2.30.0");
    assert_eq!(info.description, "");
}

#[tokio::test]
async fn info_absent_fields_default_gracefully() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/minimal/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": {"name": "minimal", "version": "0.1.0"}
        })))
        .mount(&server)
        .await;

    let info = provider(server.uri(), None).info("minimal", None).await.unwrap();
    assert_eq!(info.author, None);
    assert_eq!(info.homepage, None);
    assert_eq!(info.versions, Some(vec![]));
}

#[tokio::test]
async fn info_404_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/ghost/json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let error = provider(server.uri(), None)
        .info("ghost", None)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        PacratError::UpstreamStatus { index: Index::Pypi, status: 404 }
    ));
}

#[tokio::test]
async fn search_extracts_snippets_in_page_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("q", "http"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[
            ("requests", "2.31.0", "Python HTTP for Humans."),
            ("httpx", "0.27.0", "The next generation HTTP client."),
            ("aiohttp", "3.9.5", "Async http client/server framework"),
        ])))
        .mount(&server)
        .await;

    let results = provider(server.uri(), None).search("http", 2).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "requests");
    assert_eq!(results[0].version, "2.31.0");
    assert_eq!(results[1].name, "httpx");
}

#[tokio::test]
async fn search_with_no_snippets_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><p>no hits</p></html>"))
        .mount(&server)
        .await;

    let results = provider(server.uri(), None)
        .search("nonexistent-zzz", 5)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_with_drifted_markup_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            // Marker present but the inner spans were renamed
            "<a class=\"package-snippet\"><span class=\"pkg-title\">requests</span></a>",
        ))
        .mount(&server)
        .await;

    let error = provider(server.uri(), None).search("http", 5).await.unwrap_err();
    assert!(matches!(error, PacratError::Parse { index: Index::Pypi, .. }));
}

#[tokio::test]
async fn search_failure_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let cache = Arc::new(QueryCache::with_defaults());
    let provider = provider(server.uri(), Some(Arc::clone(&cache)));

    let error = provider.search("nonexistent-zzz", 5).await.unwrap_err();
    assert!(error.to_string().contains("500"));
    assert!(cache.is_empty());

    // Second identical call must issue a fresh network request
    let error = provider.search("nonexistent-zzz", 5).await.unwrap_err();
    assert!(matches!(
        error,
        PacratError::UpstreamStatus { index: Index::Pypi, status: 500 }
    ));
}

#[tokio::test]
async fn info_is_served_from_cache_within_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pypi/requests/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": {"name": "requests", "version": "2.31.0"},
            "releases": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(server.uri(), Some(Arc::new(QueryCache::with_defaults())));
    let first = provider.info("requests", None).await.unwrap();
    let second = provider.info("requests", None).await.unwrap();
    assert_eq!(first, second);
}
