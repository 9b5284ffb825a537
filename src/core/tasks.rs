//! The two recurring tasks: market refresh and signal regeneration.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::core::scheduler::PeriodicTask;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::{MarketUpdate, PricePoint};
use crate::services::broadcast::{BroadcastHub, EVENT_MARKET_UPDATE};
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::SignalEngine;
use crate::store::PriceHistory;

/// Fetches current quotes, appends them to the price history and fans out
/// `marketUpdate` events. A failed fetch fails the tick; the next tick
/// simply tries again (no retry within a tick).
pub struct MarketRefreshTask {
    provider: Arc<dyn MarketDataProvider>,
    history: Arc<dyn PriceHistory>,
    hub: Arc<BroadcastHub>,
    symbols: Vec<String>,
    metrics: Option<Arc<Metrics>>,
}

impl MarketRefreshTask {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        history: Arc<dyn PriceHistory>,
        hub: Arc<BroadcastHub>,
        symbols: Vec<String>,
    ) -> Self {
        Self {
            provider,
            history,
            hub,
            symbols,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

#[async_trait]
impl PeriodicTask for MarketRefreshTask {
    fn name(&self) -> &'static str {
        "market-refresh"
    }

    async fn tick(&self) -> Result<()> {
        let quotes = self.provider.fetch_prices(&self.symbols).await?;
        let now = Utc::now();

        let points: Vec<PricePoint> = quotes
            .iter()
            .map(|(symbol, quote)| PricePoint::new(symbol.clone(), quote.price, now))
            .collect();
        self.history.append(&points).await?;

        for (symbol, quote) in quotes {
            let update = MarketUpdate {
                symbol,
                price: quote.price,
                change_24h: quote.change_24h,
                volume: quote.volume,
                timestamp: now,
            };
            self.hub
                .publish(EVENT_MARKET_UPDATE, serde_json::json!(update))
                .await;
        }

        if let Some(ref metrics) = self.metrics {
            metrics.market_ticks_total.inc();
        }
        debug!(points = points.len(), "market refresh tick complete");
        Ok(())
    }
}

/// Regenerates signals for the configured symbols. Per-symbol failures are
/// already isolated inside the engine, so the tick itself never fails the
/// loop.
pub struct SignalRegenTask {
    engine: Arc<SignalEngine>,
    metrics: Option<Arc<Metrics>>,
}

impl SignalRegenTask {
    pub fn new(engine: Arc<SignalEngine>) -> Self {
        Self {
            engine,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

#[async_trait]
impl PeriodicTask for SignalRegenTask {
    fn name(&self) -> &'static str {
        "signal-regeneration"
    }

    async fn tick(&self) -> Result<()> {
        let outcome = self.engine.generate_signals_once(None).await;
        if let Some(ref metrics) = self.metrics {
            metrics.signal_ticks_total.inc();
        }
        debug!(
            signals = outcome.signals.len(),
            failures = outcome.failures.len(),
            "signal regeneration tick complete"
        );
        Ok(())
    }
}
