use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalDirection {
    Long,
    Short,
}

/// A directional call with a confidence score, immutable once created.
///
/// Signals are append-only; consumers interpret the most recent signal per
/// asset as current (`active` stays true, latest wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub asset: String,
    pub direction: SignalDirection,
    /// Heuristic agreement score in [0, 100], not a probability.
    pub confidence: u8,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Signal {
    pub fn new(asset: impl Into<String>, direction: SignalDirection, confidence: u8) -> Self {
        Self {
            asset: asset.into(),
            direction,
            confidence: confidence.min(100),
            active: true,
            created_at: Utc::now(),
        }
    }
}
