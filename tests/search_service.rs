//! End-to-end tests for `SearchService` against a local mock provider.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tokio_util::sync::CancellationToken;
use voxcart::{AppConfig, KeyValueStore, MemoryStore, ScriptedCapture, SearchService};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Only Google Shopping enabled, pointed at `base_url` with a credential.
fn google_only(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.search.cache_ttl_seconds = 0;
    config.search.timeout_seconds = 5;
    config.providers.amazon.enabled = false;
    config.providers.walmart.enabled = false;
    config.providers.google_shopping.api_key = Some("test-key".into());
    config.providers.google_shopping.base_url = Some(base_url.to_string());
    config
}

fn service(config: &AppConfig) -> (SearchService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn KeyValueStore> = store.clone();
    let svc = SearchService::new(config, dyn_store).expect("valid config");
    (svc, store)
}

fn live_body() -> serde_json::Value {
    json!({
        "products": [{
            "product_id": "g-1",
            "title": "Sony WH-CH720N",
            "price": {"value": 89.99, "currency": "USD"},
            "link": "https://shop/sony"
        }],
        "total_results": 12
    })
}

#[tokio::test]
async fn blank_input_makes_no_requests_and_records_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(0)
        .mount(&server)
        .await;

    let (svc, store) = service(&google_only(&server.uri()));
    let response = svc.search("   ").await;

    assert!(response.results.is_empty());
    assert!(response.error.is_none());
    assert!(store.get(voxcart::history::HISTORY_KEY).is_none());
}

#[tokio::test]
async fn search_sends_extracted_intent_and_records_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "headphones"))
        .and(query_param("brand", "sony"))
        .and(query_param("max_price", "100"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (svc, _store) = service(&google_only(&server.uri()));
    let raw = "Looking for headphones by Sony under $100";
    let response = svc.search(raw).await;

    assert_eq!(response.summary(), vec![("Google Shopping", 12)]);
    let titles: Vec<_> = response.products().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Sony WH-CH720N"]);
    assert_eq!(svc.history().list(), vec![raw]);
}

#[tokio::test]
async fn provider_failure_still_answers_with_samples() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (svc, _store) = service(&google_only(&server.uri()));
    let response = svc.search("iphone").await;

    assert!(response.error.is_none());
    assert_eq!(response.summary(), vec![("Google Shopping (Mock)", 2)]);
}

#[tokio::test]
async fn history_keeps_five_most_recent_distinct_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .mount(&server)
        .await;

    let (svc, _store) = service(&google_only(&server.uri()));
    for q in ["tv", "laptop", "tv", "phone", "shoes", "kettle", "lamp"] {
        svc.search(q).await;
    }
    assert_eq!(
        svc.history().list(),
        vec!["lamp", "kettle", "shoes", "phone", "tv"]
    );
}

#[tokio::test]
async fn cancellation_returns_before_slow_provider_answers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(4))
                .set_body_json(live_body()),
        )
        .mount(&server)
        .await;

    let (svc, _store) = service(&google_only(&server.uri()));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let response = svc.search_cancellable("speakers", &cancel).await;

    assert!(response.is_none());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn voice_transcript_is_searched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "find running shoes"))
        .and(query_param("max_price", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (svc, _store) = service(&google_only(&server.uri()));
    let mut capture = ScriptedCapture::new(["find running shoes under $100"]);
    let response = svc.search_voice(&mut capture).await;

    assert!(response.error.is_none());
    assert_eq!(response.summary(), vec![("Google Shopping", 12)]);
}

#[tokio::test]
async fn denied_microphone_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(0)
        .mount(&server)
        .await;

    let (svc, _store) = service(&google_only(&server.uri()));
    let response = svc.search_voice(&mut ScriptedCapture::denied()).await;

    assert!(response.results.is_empty());
    assert_eq!(response.error.as_deref(), Some("microphone permission denied"));
}

#[tokio::test]
async fn no_enabled_providers_serves_mock_union() {
    let mut config = AppConfig::default();
    config.providers.google_shopping.enabled = false;
    config.providers.amazon.enabled = false;
    config.providers.walmart.enabled = false;

    let (svc, _store) = service(&config);
    let response = svc.search("anything").await;

    assert_eq!(response.summary(), vec![("Mock Data", 6)]);
}

#[tokio::test]
async fn invalid_config_is_rejected_at_construction() {
    let mut config = AppConfig::default();
    config.search.timeout_seconds = 0;
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    assert!(SearchService::new(&config, store).is_err());
}
