//! Prometheus metrics registry.

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub market_ticks_total: IntCounter,
    pub signal_ticks_total: IntCounter,
    pub signals_generated_total: IntCounter,
    pub broadcast_messages_total: IntCounter,
    pub broadcast_disconnects_total: IntCounter,
    pub broadcast_subscribers: Gauge,
    pub http_requests_total: IntCounter,
    pub signal_evaluation_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let market_ticks_total =
            IntCounter::new("market_ticks_total", "Completed market refresh ticks")?;
        let signal_ticks_total =
            IntCounter::new("signal_ticks_total", "Completed signal regeneration ticks")?;
        let signals_generated_total =
            IntCounter::new("signals_generated_total", "Signals emitted and stored")?;
        let broadcast_messages_total = IntCounter::new(
            "broadcast_messages_total",
            "Envelopes delivered to subscriber queues",
        )?;
        let broadcast_disconnects_total = IntCounter::new(
            "broadcast_disconnects_total",
            "Subscribers disconnected on queue overflow",
        )?;
        let broadcast_subscribers =
            Gauge::new("broadcast_subscribers", "Currently registered subscribers")?;
        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let signal_evaluation_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "signal_evaluation_duration_seconds",
            "Wall time of one evaluation pass",
        ))?;

        registry.register(Box::new(market_ticks_total.clone()))?;
        registry.register(Box::new(signal_ticks_total.clone()))?;
        registry.register(Box::new(signals_generated_total.clone()))?;
        registry.register(Box::new(broadcast_messages_total.clone()))?;
        registry.register(Box::new(broadcast_disconnects_total.clone()))?;
        registry.register(Box::new(broadcast_subscribers.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(signal_evaluation_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            market_ticks_total,
            signal_ticks_total,
            signals_generated_total,
            broadcast_messages_total,
            broadcast_disconnects_total,
            broadcast_subscribers,
            http_requests_total,
            signal_evaluation_duration_seconds,
        })
    }

    /// Export all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("metrics encoding: {}", e)))
    }
}
