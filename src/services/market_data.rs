//! Upstream market-data provider.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::MarketQuote;

/// Source of current quotes for a set of symbols.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch current quotes; a non-2xx response is a transient error. The
    /// market refresh tick does not retry within itself — the next tick
    /// tries again.
    async fn fetch_prices(&self, symbols: &[String]) -> Result<HashMap<String, MarketQuote>>;
}

/// HTTP implementation over a JSON quote endpoint.
pub struct HttpMarketDataProvider {
    base_url: String,
    client: Client,
}

impl HttpMarketDataProvider {
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketDataProvider {
    async fn fetch_prices(&self, symbols: &[String]) -> Result<HashMap<String, MarketQuote>> {
        let url = format!("{}/prices", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbols.join(","))])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body: body.chars().take(160).collect(),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::deserialization("$", e.to_string(), &body))
    }
}
