//! Integration tests for the HTTP market-data provider.

use marketpulse::error::AppError;
use marketpulse::services::market_data::{HttpMarketDataProvider, MarketDataProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetches_quotes_for_requested_symbols() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices"))
        .and(query_param("symbols", "BTC,ETH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "BTC": {"price": 65000.5, "change24h": 1.2, "volume": 1000.0},
            "ETH": {"price": 3200.0, "change24h": -0.4, "volume": 5000.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HttpMarketDataProvider::with_client(server.uri(), reqwest::Client::new());
    let quotes = provider
        .fetch_prices(&["BTC".to_string(), "ETH".to_string()])
        .await
        .unwrap();

    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes["BTC"].price, 65000.5);
    assert_eq!(quotes["ETH"].change_24h, -0.4);
}

#[tokio::test]
async fn upstream_failure_is_reported_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        // The provider makes exactly one attempt; the next tick retries.
        .expect(1)
        .mount(&server)
        .await;

    let provider = HttpMarketDataProvider::with_client(server.uri(), reqwest::Client::new());
    let err = provider
        .fetch_prices(&["BTC".to_string()])
        .await
        .unwrap_err();

    match err {
        AppError::UpstreamStatus { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("upstream down"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_payload_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let provider = HttpMarketDataProvider::with_client(server.uri(), reqwest::Client::new());
    let err = provider
        .fetch_prices(&["BTC".to_string()])
        .await
        .unwrap_err();

    match err {
        AppError::Deserialization { path, .. } => assert_eq!(path, "$"),
        other => panic!("unexpected error: {:?}", other),
    }
}
