//! Environment-driven configuration.

use std::env;

/// Returns the deployment environment ("production", "sandbox", ...).
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Symbols evaluated by the scheduler and the on-demand entry point.
    pub symbols: Vec<String>,
    pub http_port: u16,
    /// Interval of the market refresh task, in seconds.
    pub market_refresh_secs: u64,
    /// Interval of the signal regeneration task, in seconds.
    pub signal_interval_secs: u64,
    pub market_data_url: String,
    pub funding_api_url: String,
    /// Per-request timeout for outbound HTTP calls, in seconds.
    pub request_timeout_secs: u64,
    /// Retries (after the first attempt) for the funding-rate API.
    pub funding_retries: u32,
    /// Price points retained per symbol; covers the longest indicator
    /// lookback (200) plus margin.
    pub history_retention: usize,
    /// Per-subscriber broadcast queue capacity.
    pub broadcast_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: vec!["BTC".to_string(), "ETH".to_string()],
            http_port: 8080,
            market_refresh_secs: 10,
            signal_interval_secs: 30,
            market_data_url: "https://api.coingecko.com/api/v3".to_string(),
            funding_api_url: "https://api.hyperliquid.xyz".to_string(),
            request_timeout_secs: 8,
            funding_retries: 2,
            history_retention: 256,
            broadcast_queue_capacity: 64,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let symbols = env::var("SYMBOLS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.symbols);

        Self {
            symbols,
            http_port: parse_env("HTTP_PORT", defaults.http_port),
            market_refresh_secs: parse_env("MARKET_REFRESH_SECONDS", defaults.market_refresh_secs),
            signal_interval_secs: parse_env("SIGNAL_INTERVAL_SECONDS", defaults.signal_interval_secs),
            market_data_url: env::var("MARKET_DATA_URL").unwrap_or(defaults.market_data_url),
            funding_api_url: env::var("FUNDING_API_URL").unwrap_or(defaults.funding_api_url),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECONDS", defaults.request_timeout_secs),
            funding_retries: parse_env("FUNDING_RETRIES", defaults.funding_retries),
            history_retention: parse_env("HISTORY_RETENTION", defaults.history_retention),
            broadcast_queue_capacity: parse_env(
                "BROADCAST_QUEUE_CAPACITY",
                defaults.broadcast_queue_capacity,
            ),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
