use crate::indicators::{ema, macd, rsi};

/// Per-symbol indicator arrays computed for one evaluation pass.
///
/// Ephemeral: built from a close series, consumed by the decision logic,
/// never persisted.
#[derive(Debug, Clone)]
pub struct IndicatorSnapshot {
    pub ema50: Vec<f64>,
    pub ema200: Vec<f64>,
    pub macd_histogram: Vec<f64>,
    pub rsi14: Vec<f64>,
}

impl IndicatorSnapshot {
    pub fn compute(closes: &[f64]) -> Self {
        let macd_series = macd(closes, 12, 26, 9);
        Self {
            ema50: ema(closes, 50),
            ema200: ema(closes, 200),
            macd_histogram: macd_series.histogram,
            rsi14: rsi(closes, 14),
        }
    }
}
