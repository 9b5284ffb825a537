//! RSI (Relative Strength Index) indicator

/// Calculate RSI over a close series.
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss.
///
/// The first `length` output entries are `f64::NAN`: RSI is undefined until
/// `length` deltas have been observed. The initial value is seeded from the
/// simple average of the first `length` gains and losses; subsequent values
/// use Wilder smoothing. A zero average loss yields RSI 100, never a
/// division failure.
pub fn rsi(series: &[f64], length: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; series.len()];
    if length == 0 || series.len() <= length {
        return out;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=length {
        let delta = series[i] - series[i - 1];
        avg_gain += delta.max(0.0);
        avg_loss += (-delta).max(0.0);
    }
    avg_gain /= length as f64;
    avg_loss /= length as f64;
    out[length] = rsi_value(avg_gain, avg_loss);

    let smoothing = length as f64;
    for i in length + 1..series.len() {
        let delta = series[i] - series[i - 1];
        avg_gain = (avg_gain * (smoothing - 1.0) + delta.max(0.0)) / smoothing;
        avg_loss = (avg_loss * (smoothing - 1.0) + (-delta).max(0.0)) / smoothing;
        out[i] = rsi_value(avg_gain, avg_loss);
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
