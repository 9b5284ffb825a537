//! Marketpulse service entry point.
//!
//! Wires the in-memory stores, upstream providers, broadcast hub, signal
//! engine and scheduler together, then serves the HTTP surface until
//! shutdown.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dotenvy::dotenv;
use marketpulse::config::{get_environment, Config};
use marketpulse::core::http::{create_router, AppState, HealthStatus};
use marketpulse::core::scheduler::Scheduler;
use marketpulse::core::tasks::{MarketRefreshTask, SignalRegenTask};
use marketpulse::logging;
use marketpulse::metrics::Metrics;
use marketpulse::services::broadcast::BroadcastHub;
use marketpulse::services::funding::FundingRateClient;
use marketpulse::services::market_data::HttpMarketDataProvider;
use marketpulse::signals::engine::SignalEngine;
use marketpulse::store::{MemoryPriceHistory, MemorySignalStore, PriceHistory, SignalStore};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env();
    info!("Starting Marketpulse");
    info!(environment = %get_environment(), "Environment");
    info!(symbols = ?config.symbols, "Symbols");

    let metrics = Arc::new(Metrics::new()?);

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let history: Arc<dyn PriceHistory> =
        Arc::new(MemoryPriceHistory::new(config.history_retention));
    let signal_store: Arc<dyn SignalStore> = Arc::new(MemorySignalStore::new());
    let hub = Arc::new(
        BroadcastHub::new(config.broadcast_queue_capacity).with_metrics(metrics.clone()),
    );

    let provider = Arc::new(HttpMarketDataProvider::with_client(
        config.market_data_url.clone(),
        http_client.clone(),
    ));
    let funding = Arc::new(FundingRateClient::with_client(
        config.funding_api_url.clone(),
        http_client,
        config.funding_retries,
    ));

    let engine = Arc::new(
        SignalEngine::new(
            history.clone(),
            signal_store.clone(),
            hub.clone(),
            config.symbols.clone(),
            config.history_retention,
        )
        .with_metrics(metrics.clone()),
    );

    let mut scheduler = Scheduler::new();
    scheduler.add(
        Arc::new(
            MarketRefreshTask::new(
                provider,
                history.clone(),
                hub.clone(),
                config.symbols.clone(),
            )
            .with_metrics(metrics.clone()),
        ),
        Duration::from_secs(config.market_refresh_secs),
    );
    scheduler.add(
        Arc::new(SignalRegenTask::new(engine.clone()).with_metrics(metrics.clone())),
        Duration::from_secs(config.signal_interval_secs),
    );
    scheduler.start().await;

    let state = AppState {
        health: Arc::new(tokio::sync::RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: Arc::new(Instant::now()),
        engine,
        hub,
        signals: signal_store,
        funding,
    };
    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await?;
    info!(port = config.http_port, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop().await;
    info!("Marketpulse stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown signal received");
}
