//! Unit tests for the in-memory stores

use chrono::{Duration, Utc};
use marketpulse::models::{PricePoint, Signal, SignalDirection};
use marketpulse::store::{MemoryPriceHistory, MemorySignalStore, PriceHistory, SignalStore};

fn points(symbol: &str, count: usize) -> Vec<PricePoint> {
    let start = Utc::now() - Duration::seconds(count as i64);
    (0..count)
        .map(|i| PricePoint::new(symbol, 100.0 + i as f64, start + Duration::seconds(i as i64)))
        .collect()
}

#[tokio::test]
async fn retention_bounds_the_buffer() {
    let history = MemoryPriceHistory::new(256);
    history.append(&points("BTC", 300)).await.unwrap();

    let all = history.latest("BTC", 400).await.unwrap();
    assert_eq!(all.len(), 256);
    // Oldest points were evicted: the first retained one is point #44.
    assert_eq!(all[0].price, 100.0 + 44.0);
}

#[tokio::test]
async fn latest_returns_most_recent_points_ascending() {
    let history = MemoryPriceHistory::new(256);
    history.append(&points("BTC", 50)).await.unwrap();

    let tail = history.latest("BTC", 10).await.unwrap();
    assert_eq!(tail.len(), 10);
    assert_eq!(tail[0].price, 140.0);
    assert_eq!(tail[9].price, 149.0);
    for pair in tail.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[tokio::test]
async fn symbols_are_isolated() {
    let history = MemoryPriceHistory::new(256);
    history.append(&points("BTC", 10)).await.unwrap();

    assert!(history.latest("ETH", 10).await.unwrap().is_empty());
    assert_eq!(history.latest("BTC", 10).await.unwrap().len(), 10);
}

#[tokio::test]
async fn signal_store_returns_latest_per_asset() {
    let store = MemorySignalStore::new();
    assert!(store.latest("BTC").await.unwrap().is_none());

    store
        .insert(&Signal::new("BTC", SignalDirection::Long, 70))
        .await
        .unwrap();
    store
        .insert(&Signal::new("ETH", SignalDirection::Short, 60))
        .await
        .unwrap();
    store
        .insert(&Signal::new("BTC", SignalDirection::Short, 90))
        .await
        .unwrap();

    let latest = store.latest("BTC").await.unwrap().unwrap();
    assert_eq!(latest.direction, SignalDirection::Short);
    assert_eq!(latest.confidence, 90);
    assert_eq!(store.len().await, 3);
}
