//! Broadcast fan-out to live subscribers.
//!
//! The hub keeps a registry of subscriber queues and delivers tagged
//! envelopes to every subscriber registered at publish time. Delivery is
//! fire-and-forget: no acknowledgement, no retry, no cross-subscriber
//! ordering guarantee. Within one subscriber, messages arrive in publish
//! order.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::metrics::Metrics;

pub const EVENT_MARKET_UPDATE: &str = "marketUpdate";
pub const EVENT_NEW_SIGNAL: &str = "newSignal";

/// Tagged event envelope sent to subscribers.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub event: &'a str,
    pub payload: Value,
}

pub struct BroadcastHub {
    subscribers: RwLock<HashMap<Uuid, mpsc::Sender<String>>>,
    /// Bounded per-subscriber queue; sends never block the publisher.
    capacity: usize,
    metrics: Option<Arc<Metrics>>,
}

impl BroadcastHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Register a subscriber and hand back its queue receiver.
    pub async fn register(&self) -> (Uuid, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.capacity);
        let id = Uuid::new_v4();
        self.subscribers.write().await.insert(id, tx);
        let count = self.subscribers.read().await.len();
        if let Some(ref metrics) = self.metrics {
            metrics.broadcast_subscribers.set(count as f64);
        }
        info!(subscriber = %id, subscribers = count, "subscriber registered");
        (id, rx)
    }

    /// Remove a subscriber on explicit disconnect.
    pub async fn unregister(&self, id: Uuid) {
        let removed = self.subscribers.write().await.remove(&id).is_some();
        if removed {
            let count = self.subscribers.read().await.len();
            if let Some(ref metrics) = self.metrics {
                metrics.broadcast_subscribers.set(count as f64);
            }
            info!(subscriber = %id, subscribers = count, "subscriber unregistered");
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Serialize the envelope once and attempt delivery to every subscriber
    /// currently registered. Returns how many queues accepted the message.
    ///
    /// A subscriber whose receiver is gone is skipped; it stays registered
    /// until its explicit disconnect. A subscriber whose bounded queue is
    /// full is disconnected (overflow policy): a stalled consumer must not
    /// grow memory without bound.
    pub async fn publish(&self, event: &str, payload: Value) -> usize {
        let envelope = Envelope { event, payload };
        let text = match serde_json::to_string(&envelope) {
            Ok(text) => text,
            Err(e) => {
                warn!(event = %event, error = %e, "envelope serialization failed");
                return 0;
            }
        };

        let snapshot: Vec<(Uuid, mpsc::Sender<String>)> = {
            let subscribers = self.subscribers.read().await;
            subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut delivered = 0;
        let mut overflowed = Vec::new();
        for (id, tx) in snapshot {
            match tx.try_send(text.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(subscriber = %id, event = %event, "queue full, disconnecting subscriber");
                    overflowed.push(id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!(subscriber = %id, event = %event, "subscriber gone, skipping");
                }
            }
        }

        if !overflowed.is_empty() {
            let mut subscribers = self.subscribers.write().await;
            for id in &overflowed {
                subscribers.remove(id);
            }
            if let Some(ref metrics) = self.metrics {
                metrics
                    .broadcast_disconnects_total
                    .inc_by(overflowed.len() as u64);
                metrics.broadcast_subscribers.set(subscribers.len() as f64);
            }
        }

        if let Some(ref metrics) = self.metrics {
            metrics.broadcast_messages_total.inc_by(delivered as u64);
        }

        delivered
    }
}
