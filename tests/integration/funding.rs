//! Integration tests for the funding-rate client against a mocked exchange.

use marketpulse::error::AppError;
use marketpulse::services::funding::FundingRateClient;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, retries: u32) -> FundingRateClient {
    FundingRateClient::with_client(server.uri(), reqwest::Client::new(), retries)
}

#[tokio::test]
async fn fetches_and_parses_a_funding_rate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info"))
        .and(body_string_contains("fundingRate"))
        .and(body_string_contains("ETH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "time": 1_700_000_000_000i64,
            "coin": "ETH",
            "fundingRate": "-0.000042"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rate = client(&server, 2).funding_rate("ETH").await.unwrap();
    assert_eq!(rate.coin, "ETH");
    assert!((rate.funding_rate + 0.000042).abs() < 1e-12);
    assert_eq!(rate.time.timestamp_millis(), 1_700_000_000_000);
}

#[tokio::test]
async fn retries_a_transient_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "time": 1_700_000_000_000i64,
            "coin": "BTC",
            "fundingRate": "0.0001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rate = client(&server, 2).funding_rate("BTC").await.unwrap();
    assert!((rate.funding_rate - 0.0001).abs() < 1e-12);
}

#[tokio::test]
async fn gives_up_after_exhausting_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(503))
        // One initial attempt plus two retries.
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server, 2).funding_rate("BTC").await.unwrap_err();
    match err {
        AppError::UpstreamStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad coin"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 2).funding_rate("NOPE").await.unwrap_err();
    match err {
        AppError::UpstreamStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("bad coin"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn shape_violations_surface_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "time": 1_700_000_000_000i64,
            "coin": "BTC"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 2).funding_rate("BTC").await.unwrap_err();
    match err {
        AppError::Deserialization { path, .. } => assert_eq!(path, "fundingRate"),
        other => panic!("unexpected error: {:?}", other),
    }
}
