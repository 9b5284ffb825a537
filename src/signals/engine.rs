//! Per-symbol signal evaluation engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::{IndicatorSnapshot, Signal};
use crate::services::broadcast::{BroadcastHub, EVENT_NEW_SIGNAL};
use crate::signals::decision::decide;
use crate::store::{PriceHistory, SignalStore};

/// Minimum price points required per symbol: enough for a stable
/// 200-period average plus margin.
pub const MIN_POINTS: usize = 210;

/// Failure evaluating or persisting one symbol; never aborts the others.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub error: String,
}

/// Result of one evaluation pass over a set of symbols.
#[derive(Debug, Clone, Serialize, Default)]
pub struct EvaluationOutcome {
    pub signals: Vec<Signal>,
    pub failures: Vec<SymbolFailure>,
}

pub struct SignalEngine {
    history: Arc<dyn PriceHistory>,
    store: Arc<dyn SignalStore>,
    hub: Arc<BroadcastHub>,
    metrics: Option<Arc<Metrics>>,
    symbols: Vec<String>,
    /// How many recent points are read per symbol.
    window: usize,
    /// Per-symbol guards: a scheduled tick and an on-demand call for the
    /// same symbol must not interleave, or both could insert a signal from
    /// the same history.
    guards: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl SignalEngine {
    pub fn new(
        history: Arc<dyn PriceHistory>,
        store: Arc<dyn SignalStore>,
        hub: Arc<BroadcastHub>,
        symbols: Vec<String>,
        window: usize,
    ) -> Self {
        Self {
            history,
            store,
            hub,
            metrics: None,
            symbols,
            window,
            guards: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Evaluate every symbol independently; a failure in one symbol is
    /// recorded in the outcome and the pass continues with the rest.
    pub async fn evaluate(&self, symbols: &[String]) -> EvaluationOutcome {
        let start = Instant::now();
        let mut outcome = EvaluationOutcome::default();

        for symbol in symbols {
            match self.evaluate_symbol(symbol).await {
                Ok(Some(signal)) => {
                    info!(
                        symbol = %symbol,
                        direction = ?signal.direction,
                        confidence = signal.confidence,
                        "signal emitted"
                    );
                    outcome.signals.push(signal);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "symbol evaluation failed");
                    outcome.failures.push(SymbolFailure {
                        symbol: symbol.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if let Some(ref metrics) = self.metrics {
            metrics
                .signal_evaluation_duration_seconds
                .observe(start.elapsed().as_secs_f64());
            metrics
                .signals_generated_total
                .inc_by(outcome.signals.len() as u64);
        }

        outcome
    }

    /// On-demand entry point; awaits full completion of the pass.
    ///
    /// Defaults to the configured symbol list when none is given, so an
    /// HTTP layer or CLI can call it without knowing the configuration.
    pub async fn generate_signals_once(&self, symbols: Option<Vec<String>>) -> EvaluationOutcome {
        let symbols = symbols.unwrap_or_else(|| self.symbols.clone());
        self.evaluate(&symbols).await
    }

    async fn evaluate_symbol(&self, symbol: &str) -> Result<Option<Signal>> {
        let guard = self.guard(symbol).await;
        let _held = guard.lock().await;

        let points = self.history.latest(symbol, self.window).await?;
        if points.len() < MIN_POINTS {
            debug!(
                symbol = %symbol,
                count = points.len(),
                min = MIN_POINTS,
                "insufficient history, skipping"
            );
            return Ok(None);
        }

        let closes: Vec<f64> = points.iter().map(|p| p.price).collect();
        let snapshot = IndicatorSnapshot::compute(&closes);

        let decision = match decide(&snapshot) {
            Some(decision) => decision,
            None => {
                debug!(symbol = %symbol, "trend and momentum disagree, skipping");
                return Ok(None);
            }
        };

        let signal = Signal::new(symbol, decision.direction, decision.confidence);
        self.store.insert(&signal).await?;
        self.hub
            .publish(EVENT_NEW_SIGNAL, serde_json::json!(&signal))
            .await;

        Ok(Some(signal))
    }

    async fn guard(&self, symbol: &str) -> Arc<Mutex<()>> {
        if let Some(guard) = self.guards.read().await.get(symbol) {
            return guard.clone();
        }
        let mut guards = self.guards.write().await;
        guards
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
