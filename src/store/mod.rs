//! Persistence collaborators: price history and signal store.
//!
//! The core only depends on these traits; the bundled implementation is an
//! in-memory store with bounded retention.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PricePoint, Signal};

pub use memory::{MemoryPriceHistory, MemorySignalStore};

/// Append-only per-symbol price history.
///
/// `latest` returns up to `count` most-recent points in ascending timestamp
/// order. No transaction boundary exists between an `append` and a
/// concurrent `latest`: a reader may observe a partial batch. This is an
/// accepted race; indicator math tolerates a point of slack.
#[async_trait]
pub trait PriceHistory: Send + Sync {
    async fn append(&self, points: &[PricePoint]) -> Result<()>;
    async fn latest(&self, symbol: &str, count: usize) -> Result<Vec<PricePoint>>;
}

/// Signal persistence. Signals are never updated or deleted by the core;
/// the most recent signal per asset is the current one.
#[async_trait]
pub trait SignalStore: Send + Sync {
    async fn insert(&self, signal: &Signal) -> Result<()>;
    async fn latest(&self, asset: &str) -> Result<Option<Signal>>;
}
