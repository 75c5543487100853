//! Unit tests for single-timeframe evaluation

use crate::test_utils::{downtrend, flat, uptrend};
use chrono::{TimeZone, Utc};
use signalbot::models::{Condition, IndicatorParams, IndicatorSnapshot, PriceBar};
use signalbot::signals::engine::{SignalEngine, TimeframeOutcome};

fn params() -> IndicatorParams {
    IndicatorParams::new(5, 3)
}

fn bar(i: i64, close: f64, high: f64, low: f64) -> PriceBar {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::hours(i);
    PriceBar::new(close, high, low, close, ts)
}

#[test]
fn test_uptrend_is_above() {
    assert_eq!(
        SignalEngine::evaluate_bars(&uptrend(10), &params()),
        TimeframeOutcome::Signal(Condition::Above)
    );
}

#[test]
fn test_downtrend_is_below() {
    assert_eq!(
        SignalEngine::evaluate_bars(&downtrend(10), &params()),
        TimeframeOutcome::Signal(Condition::Below)
    );
}

#[test]
fn test_flat_prices_give_no_signal() {
    assert_eq!(
        SignalEngine::evaluate_bars(&flat(10), &params()),
        TimeframeOutcome::NoSignal
    );
}

#[test]
fn test_price_between_indicators_gives_no_signal() {
    // Close rises above the EMA, but a spike inside the Kijun window keeps
    // the base line above price.
    let mut bars: Vec<PriceBar> = (0..5).map(|i| bar(i, 100.0, 100.5, 99.5)).collect();
    bars.push(bar(5, 100.0, 120.0, 99.5));
    bars.push(bar(6, 101.0, 101.5, 100.5));

    let snapshot = SignalEngine::snapshot(&bars, &params()).unwrap();
    assert!(snapshot.price > snapshot.ema);
    assert!(snapshot.price < snapshot.kijun);
    assert_eq!(
        SignalEngine::evaluate_bars(&bars, &params()),
        TimeframeOutcome::NoSignal
    );
}

#[test]
fn test_fewer_bars_than_longest_period() {
    assert_eq!(
        SignalEngine::evaluate_bars(&uptrend(4), &params()),
        TimeframeOutcome::InsufficientData {
            bars: 4,
            required: 5
        }
    );
    assert_eq!(
        SignalEngine::evaluate_bars(&[], &params()),
        TimeframeOutcome::InsufficientData {
            bars: 0,
            required: 5
        }
    );
}

#[test]
fn test_exactly_required_bars_is_enough() {
    let snapshot = SignalEngine::snapshot(&uptrend(5), &params()).unwrap();
    assert_eq!(
        snapshot,
        IndicatorSnapshot {
            price: 104.0,
            ema: 102.0,
            kijun: 103.0,
        }
    );
    assert_eq!(
        SignalEngine::evaluate_bars(&uptrend(5), &params()),
        TimeframeOutcome::Signal(Condition::Above)
    );
}

#[test]
fn test_undefined_indicator_is_reported() {
    let params = IndicatorParams::new(0, 3);
    assert_eq!(
        SignalEngine::evaluate_bars(&uptrend(5), &params),
        TimeframeOutcome::IndicatorUnavailable
    );
}
