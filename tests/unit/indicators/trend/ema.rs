//! Unit tests for EMA indicator

use signalbot::indicators::trend::calculate_ema;

#[test]
fn test_ema_insufficient_data() {
    let series = calculate_ema(&[1.0, 2.0, 3.0], 5);
    assert_eq!(series, vec![None, None, None]);
}

#[test]
fn test_ema_empty_input() {
    assert!(calculate_ema(&[], 3).is_empty());
}

#[test]
fn test_ema_seeded_with_simple_average() {
    let series = calculate_ema(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert_eq!(series.len(), 5);
    assert_eq!(series[0], None);
    assert_eq!(series[1], None);
    // Mean of the first three closes
    assert_eq!(series[2], Some(2.0));
    // k = 0.5
    assert_eq!(series[3], Some(3.0));
    assert_eq!(series[4], Some(4.0));
}

#[test]
fn test_ema_period_one_tracks_closes() {
    let closes = [3.0, 7.0, 1.0, 4.0];
    let series = calculate_ema(&closes, 1);
    let expected: Vec<Option<f64>> = closes.iter().map(|&c| Some(c)).collect();
    assert_eq!(series, expected);
}

#[test]
fn test_ema_constant_series_stays_constant() {
    let closes = vec![42.0; 30];
    let series = calculate_ema(&closes, 10);
    for value in series.iter().skip(9) {
        assert!((value.unwrap() - 42.0).abs() < 1e-12);
    }
}

#[test]
fn test_ema_lags_rising_prices() {
    let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
    let series = calculate_ema(&closes, 20);
    let last = series.last().copied().flatten().unwrap();
    assert!(last < *closes.last().unwrap());
    assert!(last > closes[0]);
}
