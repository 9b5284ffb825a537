//! Unit tests for the EMA indicator

use marketpulse::indicators::ema;

#[test]
fn period_one_is_identity() {
    let series = vec![3.0, 1.0, 4.0, 1.5, 9.2];
    assert_eq!(ema(&series, 1), series);
    assert_eq!(ema(&series, 0), series);
}

#[test]
fn output_length_matches_input_for_any_period() {
    let series: Vec<f64> = (0..37).map(|i| 100.0 + i as f64).collect();
    for period in [1, 2, 5, 12, 26, 50, 200] {
        assert_eq!(ema(&series, period).len(), series.len());
    }
}

#[test]
fn seeds_with_first_sample() {
    // Smoothing a constant series must leave it unchanged.
    let out = ema(&[10.0; 8], 5);
    assert_eq!(out, vec![10.0; 8]);
}

#[test]
fn applies_smoothing_factor() {
    // period 3: k = 0.5, so [1, 2] -> [1, 1.5]
    let out = ema(&[1.0, 2.0], 3);
    assert_eq!(out, vec![1.0, 1.5]);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(ema(&[], 12).is_empty());
}
