//! Unit tests for timeframe codes and lookback sizing

use chrono::{Datelike, TimeZone, Utc, Weekday};
use signalbot::models::{IndicatorParams, Timeframe, TimeframeError};
use signalbot::services::market_data::LOOKBACK_BUFFER;
use std::time::Duration;

#[test]
fn test_parse_known_codes() {
    assert_eq!("1h".parse::<Timeframe>(), Ok(Timeframe::OneHour));
    assert_eq!("1d".parse::<Timeframe>(), Ok(Timeframe::OneDay));
    assert_eq!(" 5d ".parse::<Timeframe>(), Ok(Timeframe::FiveDays));
    assert_eq!("1wk".parse::<Timeframe>(), Ok(Timeframe::OneWeek));
    assert_eq!("1mo".parse::<Timeframe>(), Ok(Timeframe::OneMonth));
}

#[test]
fn test_unknown_code_is_rejected() {
    assert_eq!(
        "2h".parse::<Timeframe>(),
        Err(TimeframeError::UnknownCode("2h".to_string()))
    );
}

#[test]
fn test_display_round_trips_code() {
    for tf in Timeframe::ALL {
        assert_eq!(tf.to_string().parse::<Timeframe>(), Ok(tf));
    }
}

#[test]
fn test_lookback_scales_with_bar_count() {
    assert_eq!(Timeframe::OneHour.lookback(10), Duration::from_secs(50_400));
    assert_eq!(
        Timeframe::FiveDays.lookback(2),
        Duration::from_secs(10 * 24 * 60 * 60)
    );
    assert_eq!(Timeframe::OneDay.lookback(0), Duration::ZERO);
}

#[test]
fn test_coarse_timeframes_are_not_stretched() {
    assert_eq!(
        Timeframe::OneWeek.lookback(3),
        Timeframe::OneWeek.duration() * 3
    );
    assert_eq!(
        Timeframe::OneMonth.lookback(3),
        Timeframe::OneMonth.duration() * 3
    );
}

fn weekdays_between(start: chrono::DateTime<Utc>, span: Duration) -> usize {
    let days = span.as_secs() / (24 * 60 * 60);
    (0..days)
        .map(|d| start + chrono::Duration::days(d as i64))
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count()
}

#[test]
fn test_default_daily_window_holds_enough_weekday_bars() {
    let required = IndicatorParams::default().required_bars();
    let span = Timeframe::OneDay.lookback(required + LOOKBACK_BUFFER);

    // Any starting weekday, minus a year's worth of market holidays
    for offset in 0..7 {
        let start = Utc.with_ymd_and_hms(2024, 1, 1 + offset, 0, 0, 0).unwrap();
        let weekdays = weekdays_between(start, span);
        assert!(
            weekdays >= required + 10,
            "{} weekday bars from {} < {}",
            weekdays,
            start,
            required + 10
        );
    }
}

#[test]
fn test_default_hourly_window_holds_enough_weekday_bars() {
    let required = IndicatorParams::default().required_bars();
    let span = Timeframe::OneHour.lookback(required + LOOKBACK_BUFFER);

    // Weekday-only hourly bars: 24 per weekday
    let start = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
    let hours = span.as_secs() / 3600;
    let trading_hours = (0..hours)
        .map(|h| start + chrono::Duration::hours(h as i64))
        .filter(|t| !matches!(t.weekday(), Weekday::Sat | Weekday::Sun))
        .count();
    assert!(trading_hours >= required, "{} < {}", trading_hours, required);
}
