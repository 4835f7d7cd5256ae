// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - Reconnaissance Pipeline Tests
 * End-to-end tests for search scraping, dork orchestration and profile
 * lookup against a mock engine
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::sync::Arc;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use varjo_recon::config::ReconConfig;
use varjo_recon::dorks::{DorkOrchestrator, DORK_CATALOG};
use varjo_recon::http_client::HttpClient;
use varjo_recon::profile::ProfileClient;
use varjo_recon::search::SearchClient;
use varjo_recon::types::ProfileReport;

fn test_http() -> Arc<HttpClient> {
    Arc::new(HttpClient::new(&ReconConfig::immediate()).unwrap())
}

fn engine_html() -> String {
    r##"
    <html><body>
    <div class="results">
      <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=abc">Wrapped</a>
      <a class="result__a" href="https://direct.example.com/profile">Direct</a>
      <a class="result__a">No href</a>
      <a class="nav__link" href="https://ignored.example.com">Navigation</a>
      <a class="result__a" href="https://third.example.com/a.jpg">Third</a>
    </div>
    </body></html>
    "##
    .to_string()
}

#[tokio::test]
async fn test_search_unwraps_and_orders_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(engine_html()))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let links = search.search("\"johndoe\"", 20).await;

    assert_eq!(
        links,
        vec![
            "https://example.com/page",
            "https://direct.example.com/profile",
            "https://third.example.com/a.jpg",
        ]
    );
}

#[tokio::test]
async fn test_search_respects_max_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(engine_html()))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let links = search.search("\"johndoe\"", 2).await;

    assert_eq!(links.len(), 2);
    assert_eq!(links[0], "https://example.com/page");
}

#[tokio::test]
async fn test_search_sends_query_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "\"johndoe\" site:instagram.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(engine_html()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let links = search.search("\"johndoe\" site:instagram.com", 20).await;
    assert!(!links.is_empty());
}

#[tokio::test]
async fn test_orchestration_one_result_per_catalog_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(engine_html()))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let result = DorkOrchestrator::new(search).run("johndoe", &[], 20).await;

    assert_eq!(result.target, "johndoe");
    assert_eq!(result.dorks.len(), DORK_CATALOG.len());
    for (i, dork) in result.dorks.iter().enumerate() {
        assert_eq!(dork.dork_type, DORK_CATALOG[i].type_name);
        assert!(dork.query.contains("johndoe"));
        assert_eq!(dork.urls.len(), 3);
    }
    assert!(!result.executed_at.is_empty());
}

#[tokio::test]
async fn test_orchestration_skips_unknown_types() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(engine_html()))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let selected = vec![
        "Mencoes Publicas".to_string(),
        "Not A Real Type".to_string(),
        "Fotos e Imagens".to_string(),
    ];
    let result = DorkOrchestrator::new(search)
        .run("johndoe", &selected, 20)
        .await;

    let types: Vec<&str> = result.dorks.iter().map(|d| d.dork_type.as_str()).collect();
    assert_eq!(types, vec!["Mencoes Publicas", "Fotos e Imagens"]);
}

#[tokio::test]
async fn test_orchestration_degrades_to_empty_on_engine_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let result = DorkOrchestrator::new(search).run("johndoe", &[], 20).await;

    // The run completes with one empty result per type instead of aborting
    assert_eq!(result.dorks.len(), DORK_CATALOG.len());
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_orchestration_degrades_to_empty_when_blocked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let result = DorkOrchestrator::new(search).run("johndoe", &[], 20).await;

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_image_dork_keeps_only_image_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(engine_html()))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let result = DorkOrchestrator::new(search).image_dork("johndoe", 20).await;

    assert_eq!(result.urls, vec!["https://third.example.com/a.jpg"]);
}

#[tokio::test]
async fn test_image_dork_cap_applies_after_filtering() {
    let mock_server = MockServer::start().await;

    // Page links interleaved with image links: the gallery cap must count
    // images, not raw results
    let html = r##"
    <html><body>
    <a class="result__a" href="https://a.com/article">Article</a>
    <a class="result__a" href="https://a.com/1.jpg">One</a>
    <a class="result__a" href="https://a.com/about">About</a>
    <a class="result__a" href="https://a.com/2.png">Two</a>
    <a class="result__a" href="https://a.com/3.jpeg">Three</a>
    </body></html>
    "##;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let result = DorkOrchestrator::new(search).image_dork("johndoe", 2).await;

    assert_eq!(result.urls, vec!["https://a.com/1.jpg", "https://a.com/2.png"]);
}

#[tokio::test]
async fn test_private_sniffer_builds_collab_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(engine_html()))
        .mount(&mock_server)
        .await;

    let search = SearchClient::new(test_http()).with_endpoint(mock_server.uri());
    let result = DorkOrchestrator::new(search)
        .private_sniffer("johndoe", 20)
        .await;

    assert_eq!(result.username, "johndoe");
    assert!(result.query.contains("site:instagram.com"));
    assert!(result.query.contains("collab"));
    assert_eq!(result.urls.len(), 3);
}

#[tokio::test]
async fn test_profile_lookup_success() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "data": {
            "user": {
                "username": "johndoe",
                "biography": "photographer",
                "edge_followed_by": {"count": 1500},
                "edge_follow": {"count": 300},
                "id": "998877",
                "profile_pic_url_hd": "https://cdn.example.com/pic.jpg",
                "is_private": true
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(query_param("username", "johndoe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(test_http())
        .with_endpoint(format!("{}/profile", mock_server.uri()));
    let report = client.get_profile_metadata("@johndoe").await;

    match report {
        ProfileReport::Profile(profile) => {
            assert_eq!(profile.username, "johndoe");
            assert_eq!(profile.followers, 1500);
            assert_eq!(profile.following, 300);
            assert!(profile.is_private);
        }
        ProfileReport::Failed(failure) => panic!("unexpected failure: {}", failure.error),
    }
}

#[tokio::test]
async fn test_profile_rate_limit_reported_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(test_http()).with_endpoint(mock_server.uri());
    let report = client.get_profile_metadata("johndoe").await;

    assert_eq!(report.username(), "johndoe");
    assert!(report.error().unwrap().contains("429"));
}

#[tokio::test]
async fn test_profile_unreachable_endpoint_reported_not_raised() {
    let client = ProfileClient::new(test_http()).with_endpoint("http://127.0.0.1:1/profile");
    let report = client.get_profile_metadata("johndoe").await;

    assert_eq!(report.username(), "johndoe");
    assert!(report.error().is_some());
}

#[tokio::test]
async fn test_monitor_reports_follower_delta() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "data": {
            "user": {
                "username": "johndoe",
                "biography": "",
                "edge_followed_by": {"count": 120},
                "edge_follow": {"count": 10},
                "id": "1",
                "profile_pic_url": "",
                "is_private": false
            }
        }
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(test_http()).with_endpoint(mock_server.uri());
    let delta = client.monitor_followers("johndoe", 150).await;

    assert_eq!(delta.current_followers, Some(120));
    assert_eq!(delta.delta, Some(-30));
    assert!(delta.error.is_none());
}

#[tokio::test]
async fn test_monitor_reports_lookup_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = ProfileClient::new(test_http()).with_endpoint(mock_server.uri());
    let delta = client.monitor_followers("johndoe", 150).await;

    assert_eq!(delta.current_followers, None);
    assert_eq!(delta.delta, None);
    assert!(delta.error.unwrap().contains("429"));
}
