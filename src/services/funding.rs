//! Exchange funding-rate API client.
//!
//! Request: `POST {base}/info` with `{"type": "fundingRate", "coin": ...}`.
//! Response: `{time: epoch millis, coin, fundingRate}`.
//!
//! Transport failures, timeouts, 5xx and 429 are retried with exponential
//! backoff; other 4xx and shape-validation failures surface immediately
//! with the offending field path attached.

use std::time::Duration;

use backon::Retryable;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{AppError, Result};

const BACKOFF_BASE_MS: u64 = 300;
const BACKOFF_CAP_MS: u64 = 30_000;

/// Backoff delay for retry attempt `k`: `min(300ms * 2^k, 30s)`.
pub fn retry_delay(attempt: u32) -> Duration {
    let millis = BACKOFF_BASE_MS.saturating_mul(1u64 << attempt.min(20));
    Duration::from_millis(millis.min(BACKOFF_CAP_MS))
}

/// Capped exponential backoff yielding `retry_delay(0..retries)`.
#[derive(Debug, Clone)]
pub struct FundingBackoff {
    retries: u32,
    attempt: u32,
}

impl FundingBackoff {
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            attempt: 0,
        }
    }
}

impl Iterator for FundingBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.attempt >= self.retries {
            return None;
        }
        let delay = retry_delay(self.attempt);
        self.attempt += 1;
        Some(delay)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FundingRateRequest<'a> {
    #[serde(rename = "type")]
    request_type: &'a str,
    coin: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRate {
    pub time: DateTime<Utc>,
    pub coin: String,
    pub funding_rate: f64,
}

pub struct FundingRateClient {
    base_url: String,
    client: Client,
    retries: u32,
}

impl FundingRateClient {
    pub fn with_client(base_url: impl Into<String>, client: Client, retries: u32) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            retries,
        }
    }

    /// Fetch the current funding rate for a coin, retrying retryable
    /// failures with capped exponential backoff.
    pub async fn funding_rate(&self, coin: &str) -> Result<FundingRate> {
        (|| self.fetch_once(coin))
            .retry(FundingBackoff::new(self.retries))
            .when(AppError::is_retryable)
            .notify(|err: &AppError, delay: Duration| {
                warn!(error = %err, delay_ms = delay.as_millis() as u64, "funding rate fetch failed, retrying");
            })
            .await
    }

    async fn fetch_once(&self, coin: &str) -> Result<FundingRate> {
        let request = FundingRateRequest {
            request_type: "fundingRate",
            coin,
        };
        let response = self
            .client
            .post(format!("{}/info", self.base_url))
            .json(&request)
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

        parse_funding_rate(&body)
    }
}

/// Validate the response shape field by field so a violation names the
/// exact path that failed.
pub fn parse_funding_rate(body: &str) -> Result<FundingRate> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::deserialization("$", e.to_string(), body))?;

    let time_millis = value
        .get("time")
        .and_then(Value::as_i64)
        .ok_or_else(|| AppError::deserialization("time", "expected epoch milliseconds", body))?;
    let time = DateTime::from_timestamp_millis(time_millis)
        .ok_or_else(|| AppError::deserialization("time", "timestamp out of range", body))?;

    let coin = value
        .get("coin")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::deserialization("coin", "expected string", body))?
        .to_string();

    let funding_rate = match value.get("fundingRate") {
        Some(Value::String(raw)) => raw.parse::<f64>().map_err(|_| {
            AppError::deserialization("fundingRate", "expected decimal string", body)
        })?,
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
            AppError::deserialization("fundingRate", "expected finite number", body)
        })?,
        _ => {
            return Err(AppError::deserialization(
                "fundingRate",
                "expected decimal string or number",
                body,
            ))
        }
    };

    Ok(FundingRate {
        time,
        coin,
        funding_rate,
    })
}
