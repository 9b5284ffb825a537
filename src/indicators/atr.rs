//! ATR (Average True Range) indicator

/// Calculate ATR from high/low/close series.
///
/// True range at index 0 is `high - low`; afterwards it is the maximum of
/// the bar range and the absolute gaps against the previous close. The
/// first defined output, at index `period - 1`, is the simple average of
/// the first `period` true ranges; every later value is Wilder-smoothed:
/// `atr[i] = (atr[i-1] * (period - 1) + tr[i]) / period`.
///
/// Entries before index `period - 1` are `f64::NAN`. Output is never
/// negative for valid input.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let len = high.len().min(low.len()).min(close.len());
    let mut out = vec![f64::NAN; len];
    if period == 0 || len < period {
        return out;
    }

    let mut tr = Vec::with_capacity(len);
    for i in 0..len {
        let range = high[i] - low[i];
        let value = if i == 0 {
            range
        } else {
            let prev_close = close[i - 1];
            range
                .max((high[i] - prev_close).abs())
                .max((low[i] - prev_close).abs())
        };
        tr.push(value);
    }

    let mut value = tr[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = value;
    for i in period..len {
        value = (value * (period as f64 - 1.0) + tr[i]) / period as f64;
        out[i] = value;
    }

    out
}
