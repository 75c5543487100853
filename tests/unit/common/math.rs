//! Unit tests for numeric helpers

use signalbot::common::math::{midpoint, sma, SlidingExtremum};

#[test]
fn test_sma_uses_leading_window() {
    assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), Some(1.5));
    assert_eq!(sma(&[2.0, 4.0, 6.0], 3), Some(4.0));
}

#[test]
fn test_sma_rejects_short_input_and_zero_period() {
    assert_eq!(sma(&[1.0, 2.0], 3), None);
    assert_eq!(sma(&[1.0, 2.0], 0), None);
    assert_eq!(sma(&[], 1), None);
}

#[test]
fn test_midpoint() {
    assert_eq!(midpoint(10.0, 8.0), 9.0);
    assert_eq!(midpoint(-1.0, 1.0), 0.0);
}

#[test]
fn test_sliding_max_evicts_old_values() {
    let mut highest = SlidingExtremum::max(3);
    let out: Vec<_> = [1.0, 3.0, 2.0, 0.0, -1.0]
        .into_iter()
        .enumerate()
        .map(|(i, v)| highest.push(i, v))
        .collect();
    assert_eq!(out, vec![Some(1.0), Some(3.0), Some(3.0), Some(3.0), Some(2.0)]);
}

#[test]
fn test_sliding_min() {
    let mut lowest = SlidingExtremum::min(2);
    let out: Vec<_> = [5.0, 3.0, 4.0, 6.0]
        .into_iter()
        .enumerate()
        .map(|(i, v)| lowest.push(i, v))
        .collect();
    assert_eq!(out, vec![Some(5.0), Some(3.0), Some(3.0), Some(4.0)]);
}

#[test]
fn test_sliding_extremum_matches_naive_scan() {
    let values: Vec<f64> = (0..200)
        .map(|i| ((i * 37) % 101) as f64 - 50.0)
        .collect();
    let window = 26;
    let mut highest = SlidingExtremum::max(window);
    let mut lowest = SlidingExtremum::min(window);

    for (i, &v) in values.iter().enumerate() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        let naive_max = slice.iter().cloned().fold(f64::MIN, f64::max);
        let naive_min = slice.iter().cloned().fold(f64::MAX, f64::min);
        assert_eq!(highest.push(i, v), Some(naive_max), "max at {}", i);
        assert_eq!(lowest.push(i, v), Some(naive_min), "min at {}", i);
    }
}
