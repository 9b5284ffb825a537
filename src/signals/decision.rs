//! Directional decision and confidence scoring from an indicator snapshot.

use crate::models::{IndicatorSnapshot, SignalDirection};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Minimum relative EMA 50/200 gap that counts as a strong trend.
pub const EMA_GAP_THRESHOLD: f64 = 0.005;
pub const BASE_CONFIDENCE: u8 = 60;
pub const CONFIDENCE_STEP: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: SignalDirection,
    pub confidence: u8,
}

/// Combine trend, momentum and RSI regime into a directional call.
///
/// Trend is bullish iff the latest EMA50 is above the latest EMA200;
/// momentum is bullish iff the latest MACD histogram value is positive.
/// The two must agree, otherwise no decision is produced for this pass.
///
/// The RSI regime (oversold bullish, overbought bearish, neutral inherits
/// the trend) only affects the confidence score, never the direction.
pub fn decide(snapshot: &IndicatorSnapshot) -> Option<Decision> {
    let ema50 = *snapshot.ema50.last()?;
    let ema200 = *snapshot.ema200.last()?;
    // Empty histogram means the series was too short for MACD.
    let histogram = *snapshot.macd_histogram.last()?;
    let rsi = *snapshot.rsi14.last()?;

    let trend_bullish = ema50 > ema200;
    let momentum_bullish = histogram > 0.0;

    let direction = match (trend_bullish, momentum_bullish) {
        (true, true) => SignalDirection::Long,
        (false, false) => SignalDirection::Short,
        _ => return None,
    };

    let regime_bullish = if rsi < RSI_OVERSOLD {
        true
    } else if rsi > RSI_OVERBOUGHT {
        false
    } else {
        trend_bullish
    };

    let mut confidence = BASE_CONFIDENCE;
    if histogram.abs() > 0.0 {
        confidence += CONFIDENCE_STEP;
    }
    if ema200 != 0.0 && ((ema50 - ema200) / ema200).abs() > EMA_GAP_THRESHOLD {
        confidence += CONFIDENCE_STEP;
    }
    if regime_bullish == (direction == SignalDirection::Long) {
        confidence += CONFIDENCE_STEP;
    }

    Some(Decision {
        direction,
        confidence: confidence.min(100),
    })
}
