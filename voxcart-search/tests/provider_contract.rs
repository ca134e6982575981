//! Provider contract tests.
//!
//! Verify the HTTP requests each built-in provider sends and how its
//! responses, failures and missing credentials are turned into results.
//! All traffic goes to a local `wiremock` server.

use serde_json::json;
use voxcart_search::adapter::HttpProvider;
use voxcart_search::cache::ResponseCache;
use voxcart_search::providers;
use voxcart_search::{
    Brand, Category, FilterSet, ProductProvider, ProviderConfig, ProviderKind,
};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

fn provider(kind: ProviderKind, server: &MockServer, cache: ResponseCache) -> HttpProvider {
    let config = ProviderConfig::new(kind)
        .with_api_key(KEY)
        .with_base_url(server.uri());
    HttpProvider::new(providers::spec_for(kind), config, reqwest::Client::new(), cache)
}

fn sony_under_100() -> FilterSet {
    FilterSet {
        max_price: Some(100),
        brand: Some(Brand::Sony),
        category: Some(Category::Electronics),
        ..Default::default()
    }
}

#[tokio::test]
async fn google_sends_query_filters_and_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "headphones"))
        .and(query_param("country", "us"))
        .and(query_param("language", "en"))
        .and(query_param("max_price", "100"))
        .and(query_param("brand", "sony"))
        .and(query_param("category", "electronics"))
        .and(header("X-RapidAPI-Key", KEY))
        .and(header("X-RapidAPI-Host", "google-shopping-product-search.p.rapidapi.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                {
                    "product_id": "g-1",
                    "title": "Sony WH-CH720N",
                    "price": {"value": "98.00", "currency": "USD"},
                    "rating": {"value": 4.3, "count": 512}
                },
                {"title": "Sony MDR-7506"}
            ],
            "total_results": 240
        })))
        .expect(1)
        .mount(&server)
        .await;

    let google = provider(ProviderKind::GoogleShopping, &server, ResponseCache::disabled());
    let result = google.fetch("headphones", &sony_under_100()).await;

    assert_eq!(result.source, "Google Shopping");
    assert!(!result.is_mock());
    assert_eq!(result.total_results, 240);
    assert_eq!(result.products.len(), 2);
    assert_eq!(result.products[0].id, "g-1");
    assert!((result.products[0].price - 98.0).abs() < f64::EPSILON);
    assert!(result.products[1].id.starts_with("google-"));
    assert_eq!(result.products[1].price, 0.0);
}

#[tokio::test]
async fn amazon_omits_unsupported_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "headphones"))
        .and(query_param("brand", "sony"))
        .and(query_param_is_missing("category"))
        .and(header("X-RapidAPI-Host", "amazon-product-search1.p.rapidapi.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"asin": "B0A", "title": "Sony WH-1000XM4", "price": {"current_price": 99.99}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let amazon = provider(ProviderKind::Amazon, &server, ResponseCache::disabled());
    let result = amazon.fetch("headphones", &sony_under_100()).await;

    assert_eq!(result.source, "Amazon");
    // No native total: falls back to the number of products returned.
    assert_eq!(result.total_results, 1);
    assert_eq!(result.products[0].currency, "USD");
}

#[tokio::test]
async fn walmart_without_filters_sends_only_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "vacuum"))
        .and(query_param_is_missing("max_price"))
        .and(query_param_is_missing("brand"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "w-1", "title": "Shark Navigator"}],
            "total_count": 88
        })))
        .expect(1)
        .mount(&server)
        .await;

    let walmart = provider(ProviderKind::Walmart, &server, ResponseCache::disabled());
    let result = walmart.fetch("vacuum", &FilterSet::default()).await;

    assert_eq!(result.source, "Walmart");
    assert_eq!(result.total_results, 88);
}

#[tokio::test]
async fn server_error_falls_back_to_samples() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let amazon = provider(ProviderKind::Amazon, &server, ResponseCache::disabled());
    let result = amazon.fetch("headphones", &FilterSet::default()).await;

    assert_eq!(result.source, "Amazon (Mock)");
    assert_eq!(result.products.len(), 2);
    assert_eq!(result.products[0].id, "amazon-1");
}

#[tokio::test]
async fn rate_limit_status_falls_back_to_samples() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let google = provider(ProviderKind::GoogleShopping, &server, ResponseCache::disabled());
    let result = google.fetch("phone", &FilterSet::default()).await;
    assert_eq!(result.source, "Google Shopping (Mock)");
}

#[tokio::test]
async fn malformed_json_falls_back_to_samples() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let walmart = provider(ProviderKind::Walmart, &server, ResponseCache::disabled());
    let result = walmart.fetch("vacuum", &FilterSet::default()).await;

    assert_eq!(result.source, "Walmart (Mock)");
    assert_eq!(result.total_results, 2);
}

#[tokio::test]
async fn one_odd_item_keeps_the_page_live() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"asin": "A", "title": "Echo Dot", "price": {"current_price": 49.99}},
                {"asin": "B", "title": 12345, "thumbnail": false}
            ],
            "total_results": 2
        })))
        .mount(&server)
        .await;

    let amazon = provider(ProviderKind::Amazon, &server, ResponseCache::disabled());
    let result = amazon.fetch("echo", &FilterSet::default()).await;

    assert_eq!(result.source, "Amazon");
    let titles: Vec<_> = result.products.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Echo Dot", "12345"]);
}

#[tokio::test]
async fn missing_key_never_touches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ProviderConfig::new(ProviderKind::Amazon).with_base_url(server.uri());
    let amazon = HttpProvider::new(
        providers::amazon::SPEC,
        config,
        reqwest::Client::new(),
        ResponseCache::disabled(),
    );
    let result = amazon.fetch("headphones", &FilterSet::default()).await;

    assert_eq!(result.source, "Amazon (Mock)");
}

#[tokio::test]
async fn live_responses_are_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "w-9", "title": "Kettle"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let walmart = provider(ProviderKind::Walmart, &server, ResponseCache::new(600));
    let first = walmart.fetch("Kettle", &FilterSet::default()).await;
    let second = walmart.fetch("kettle ", &FilterSet::default()).await;

    assert_eq!(first.source, "Walmart");
    assert_eq!(first, second);
}

#[tokio::test]
async fn fallbacks_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let amazon = provider(ProviderKind::Amazon, &server, ResponseCache::new(600));
    let first = amazon.fetch("tv", &FilterSet::default()).await;
    let second = amazon.fetch("tv", &FilterSet::default()).await;

    assert!(first.is_mock());
    assert!(second.is_mock());
}
