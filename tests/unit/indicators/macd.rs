//! Unit tests for the MACD indicator

use marketpulse::indicators::macd;

#[test]
fn short_series_yields_empty_arrays() {
    // Threshold is slow + signal + 5 = 40 samples.
    let series: Vec<f64> = (0..39).map(|i| 100.0 + i as f64).collect();
    let out = macd(&series, 12, 26, 9);
    assert!(out.is_empty());
    assert!(out.macd.is_empty());
    assert!(out.signal.is_empty());
    assert!(out.histogram.is_empty());
}

#[test]
fn threshold_length_produces_output() {
    let series: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let out = macd(&series, 12, 26, 9);
    assert_eq!(out.macd.len(), 40);
    assert_eq!(out.signal.len(), 40);
    assert_eq!(out.histogram.len(), 40);
}

#[test]
fn histogram_is_macd_minus_signal() {
    let series: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
    let out = macd(&series, 12, 26, 9);
    for i in 0..out.macd.len() {
        assert!((out.histogram[i] - (out.macd[i] - out.signal[i])).abs() < 1e-12);
    }
}

#[test]
fn rising_series_has_positive_histogram() {
    let series: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
    let out = macd(&series, 12, 26, 9);
    assert!(*out.histogram.last().unwrap() > 0.0);
    assert!(*out.macd.last().unwrap() > 0.0);
}

#[test]
fn falling_series_has_negative_histogram() {
    let series: Vec<f64> = (0..100).map(|i| 500.0 - i as f64).collect();
    let out = macd(&series, 12, 26, 9);
    assert!(*out.histogram.last().unwrap() < 0.0);
}
