//! In-memory store implementations with bounded retention.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{PricePoint, Signal};
use crate::store::{PriceHistory, SignalStore};

/// Per-symbol ring buffer of the most recent price points.
pub struct MemoryPriceHistory {
    retention: usize,
    points: RwLock<HashMap<String, VecDeque<PricePoint>>>,
}

impl MemoryPriceHistory {
    pub fn new(retention: usize) -> Self {
        Self {
            retention: retention.max(1),
            points: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PriceHistory for MemoryPriceHistory {
    async fn append(&self, points: &[PricePoint]) -> Result<()> {
        let mut map = self.points.write().await;
        for point in points {
            let buffer = map.entry(point.symbol.clone()).or_default();
            buffer.push_back(point.clone());
            while buffer.len() > self.retention {
                buffer.pop_front();
            }
        }
        Ok(())
    }

    async fn latest(&self, symbol: &str, count: usize) -> Result<Vec<PricePoint>> {
        let map = self.points.read().await;
        let buffer = match map.get(symbol) {
            Some(buffer) => buffer,
            None => return Ok(Vec::new()),
        };
        let skip = buffer.len().saturating_sub(count);
        Ok(buffer.iter().skip(skip).cloned().collect())
    }
}

/// Append-only in-memory signal log.
#[derive(Default)]
pub struct MemorySignalStore {
    signals: RwLock<Vec<Signal>>,
}

impl MemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.signals.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SignalStore for MemorySignalStore {
    async fn insert(&self, signal: &Signal) -> Result<()> {
        self.signals.write().await.push(signal.clone());
        Ok(())
    }

    async fn latest(&self, asset: &str) -> Result<Option<Signal>> {
        let signals = self.signals.read().await;
        Ok(signals.iter().rev().find(|s| s.asset == asset).cloned())
    }
}
