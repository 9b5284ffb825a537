//! Unit tests for the broadcast hub

use marketpulse::services::broadcast::BroadcastHub;
use serde_json::json;

#[tokio::test]
async fn publish_reaches_every_registered_subscriber() {
    let hub = BroadcastHub::new(8);
    let (_a, mut rx_a) = hub.register().await;
    let (_b, mut rx_b) = hub.register().await;
    let (_c, mut rx_c) = hub.register().await;

    let delivered = hub.publish("marketUpdate", json!({"symbol": "BTC"})).await;
    assert_eq!(delivered, 3);

    for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
        let raw = rx.recv().await.unwrap();
        let envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(envelope["event"], "marketUpdate");
        assert_eq!(envelope["payload"]["symbol"], "BTC");
    }
}

#[tokio::test]
async fn failed_subscriber_does_not_block_the_rest() {
    let hub = BroadcastHub::new(8);
    let (_a, rx_a) = hub.register().await;
    let (_b, mut rx_b) = hub.register().await;

    // Simulate a dead consumer.
    drop(rx_a);

    let delivered = hub.publish("newSignal", json!({"asset": "ETH"})).await;
    assert_eq!(delivered, 1);
    assert!(rx_b.recv().await.is_some());

    // A send failure alone never evicts; only explicit disconnect does.
    assert_eq!(hub.subscriber_count().await, 2);
}

#[tokio::test]
async fn unregister_removes_subscriber() {
    let hub = BroadcastHub::new(8);
    let (id, mut rx) = hub.register().await;
    assert_eq!(hub.subscriber_count().await, 1);

    hub.unregister(id).await;
    assert_eq!(hub.subscriber_count().await, 0);
    assert_eq!(hub.publish("marketUpdate", json!({})).await, 0);
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn overflowing_subscriber_is_disconnected() {
    let hub = BroadcastHub::new(2);
    let (_id, mut rx) = hub.register().await;

    assert_eq!(hub.publish("marketUpdate", json!({"seq": 1})).await, 1);
    assert_eq!(hub.publish("marketUpdate", json!({"seq": 2})).await, 1);
    // Queue is full and nothing is draining it: overflow policy kicks in.
    assert_eq!(hub.publish("marketUpdate", json!({"seq": 3})).await, 0);
    assert_eq!(hub.subscriber_count().await, 0);

    // The two queued messages are still readable, then the queue closes.
    assert!(rx.recv().await.is_some());
    assert!(rx.recv().await.is_some());
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn delivery_order_per_subscriber_matches_publish_order() {
    let hub = BroadcastHub::new(8);
    let (_id, mut rx) = hub.register().await;

    for seq in 0..5 {
        hub.publish("marketUpdate", json!({"seq": seq})).await;
    }

    for seq in 0..5 {
        let raw = rx.recv().await.unwrap();
        let envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(envelope["payload"]["seq"], seq);
    }
}

#[tokio::test]
async fn late_registration_misses_earlier_publishes() {
    let hub = BroadcastHub::new(8);
    hub.publish("marketUpdate", json!({"seq": 0})).await;

    let (_id, mut rx) = hub.register().await;
    hub.publish("marketUpdate", json!({"seq": 1})).await;

    let raw = rx.recv().await.unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(envelope["payload"]["seq"], 1);
}
