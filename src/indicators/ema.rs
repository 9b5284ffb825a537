//! EMA (Exponential Moving Average) indicator

/// Calculate the EMA of a series.
///
/// A period of 1 or less is the identity transform: the output is a copy of
/// the input. Otherwise the running value is seeded with `series[0]` and
/// each subsequent sample is smoothed with factor `k = 2 / (period + 1)`.
/// Output length always equals input length.
pub fn ema(series: &[f64], period: usize) -> Vec<f64> {
    if period <= 1 {
        return series.to_vec();
    }

    let mut out = Vec::with_capacity(series.len());
    let k = 2.0 / (period as f64 + 1.0);

    let mut value = match series.first() {
        Some(&first) => first,
        None => return out,
    };
    out.push(value);

    for &sample in &series[1..] {
        value = sample * k + value * (1.0 - k);
        out.push(value);
    }

    out
}
