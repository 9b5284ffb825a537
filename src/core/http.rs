//! HTTP endpoint server using Axum

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Request, State, WebSocketUpgrade,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

use crate::error::AppError;
use crate::metrics::Metrics;
use crate::services::broadcast::BroadcastHub;
use crate::services::funding::FundingRateClient;
use crate::signals::engine::SignalEngine;
use crate::store::SignalStore;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub engine: Arc<SignalEngine>,
    pub hub: Arc<BroadcastHub>,
    pub signals: Arc<dyn SignalStore>,
    pub funding: Arc<FundingRateClient>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "marketpulse-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.metrics.http_requests_total.inc();
    next.run(request).await
}

#[derive(Debug, Default, Deserialize)]
struct GenerateRequest {
    symbols: Option<Vec<String>>,
}

/// On-demand signal generation; awaits the full evaluation pass.
async fn generate_signals(
    State(state): State<AppState>,
    body: Option<Json<GenerateRequest>>,
) -> Json<Value> {
    let symbols = body.and_then(|Json(request)| request.symbols);
    let outcome = state.engine.generate_signals_once(symbols).await;
    Json(json!(outcome))
}

/// Most recent signal for an asset.
async fn latest_signal(
    State(state): State<AppState>,
    Path(asset): Path<String>,
) -> Result<Json<Value>, AppError> {
    let signal = state
        .signals
        .latest(&asset)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no signal for {}", asset)))?;
    Ok(Json(json!(signal)))
}

/// Current funding rate for a coin, proxied from the exchange API.
async fn funding_rate(
    State(state): State<AppState>,
    Path(coin): Path<String>,
) -> Result<Json<Value>, AppError> {
    let rate = state.funding.funding_rate(&coin).await?;
    Ok(Json(json!(rate)))
}

/// Upgrade a subscriber connection and bridge its hub queue to the socket.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_subscriber(socket, state))
}

async fn handle_subscriber(socket: WebSocket, state: AppState) {
    let (id, mut rx) = state.hub.register().await;
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            queued = rx.recv() => match queued {
                // Queue closed means the hub disconnected us (overflow).
                None => break,
                Some(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        debug!(subscriber = %id, "socket send failed, closing");
                        break;
                    }
                }
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Ignore client chatter; the stream is push-only.
                Some(Ok(_)) => {}
            },
        }
    }

    state.hub.unregister(id).await;
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/ws", get(ws_handler))
        .route("/api/signals/generate", post(generate_signals))
        .route("/api/signals/{asset}", get(latest_signal))
        .route("/api/funding/{coin}", get(funding_rate))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
