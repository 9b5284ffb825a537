//! MACD (Moving Average Convergence Divergence) indicator

use super::ema::ema;

/// MACD line, signal line and histogram, elementwise over the input series.
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Calculate MACD over a close series.
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal_period) of the MACD line
/// Histogram = MACD - Signal
///
/// Returns empty arrays when the series is shorter than
/// `slow + signal_period + 5` samples (insufficient-data sentinel).
pub fn macd(series: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    if series.len() < slow + signal_period + 5 {
        return MacdSeries::default();
    }

    let ema_fast = ema(series, fast);
    let ema_slow = ema(series, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&macd_line, signal_period);
    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MacdSeries {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}
