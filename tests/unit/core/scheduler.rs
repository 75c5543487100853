//! Unit tests for cron parsing, the cycle guard and the scheduler

use crate::test_utils::{uptrend, RecordingNotifier, Script, ScriptedProvider};
use signalbot::bot::Session;
use signalbot::core::scheduler::{parse_schedule, CycleGuard, JobScheduler, Trigger};
use signalbot::core::CycleRunner;
use signalbot::metrics::Metrics;
use signalbot::models::{IndicatorParams, Instrument, Timeframe};
use signalbot::services::market_data::MarketDataGateway;
use signalbot::signals::Aggregator;
use std::sync::Arc;
use std::time::Duration;

fn guard_with(script: Script) -> (CycleGuard, Arc<Session>, Arc<RecordingNotifier>, Arc<Metrics>) {
    let provider = Arc::new(ScriptedProvider::new().with("EURUSD=X", Timeframe::OneDay, script));
    let notifier = Arc::new(RecordingNotifier::new());
    let session = Arc::new(Session::new());
    let metrics = Arc::new(Metrics::new().unwrap());
    let aggregator = Arc::new(Aggregator::new(
        MarketDataGateway::new(provider),
        vec![Timeframe::OneDay],
        IndicatorParams::new(5, 3),
    ));
    let runner = Arc::new(CycleRunner::new(
        aggregator,
        vec![Instrument::new("EURUSD", "EURUSD=X")],
        session.clone(),
        notifier.clone(),
        42,
    ));
    let guard = CycleGuard::new(runner).with_metrics(metrics.clone());
    (guard, session, notifier, metrics)
}

#[test]
fn test_parse_six_field_expression() {
    assert!(parse_schedule("0 0 * * * *").is_ok());
    assert!(parse_schedule("*/10 * * * * *").is_ok());
}

#[test]
fn test_parse_five_field_expression_adds_seconds() {
    let five = parse_schedule("*/5 * * * *").unwrap();
    let six = parse_schedule("0 */5 * * * *").unwrap();
    let after = chrono::Utc::now();
    assert_eq!(
        five.after(&after).take(3).collect::<Vec<_>>(),
        six.after(&after).take(3).collect::<Vec<_>>()
    );
}

#[test]
fn test_parse_invalid_expression() {
    assert!(parse_schedule("every hour").is_err());
}

#[test]
fn test_trigger_display() {
    assert_eq!(Trigger::Schedule.to_string(), "schedule");
    assert_eq!(Trigger::Subscribe.to_string(), "subscribe");
}

#[tokio::test]
async fn test_guard_runs_cycle_when_idle() {
    let (guard, session, notifier, _metrics) = guard_with(Script::Bars(uptrend(20)));
    session.subscribe();

    let report = guard.trigger(Trigger::Subscribe).await.unwrap();
    assert!(report.notified);
    assert_eq!(notifier.sent().len(), 1);
    assert!(!guard.is_busy());
}

#[tokio::test]
async fn test_guard_skips_overlapping_trigger() {
    let (guard, session, notifier, metrics) =
        guard_with(Script::Delay(Duration::from_millis(300), uptrend(20)));
    session.subscribe();

    let running = {
        let guard = guard.clone();
        tokio::spawn(async move { guard.trigger(Trigger::Schedule).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(guard.is_busy());

    assert!(guard.trigger(Trigger::Subscribe).await.is_none());
    assert_eq!(metrics.cycles_skipped_total.get(), 1);

    let report = running.await.unwrap();
    assert!(report.is_some());
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_scheduler_start_and_stop() {
    let (guard, _session, _notifier, _metrics) = guard_with(Script::Bars(uptrend(20)));
    let scheduler = JobScheduler::new(guard, parse_schedule("0 0 0 1 1 *").unwrap());

    assert!(!scheduler.is_running().await);
    scheduler.start().await;
    assert!(scheduler.is_running().await);
    scheduler.stop().await;
    assert!(!scheduler.is_running().await);
}

#[tokio::test]
async fn test_scheduler_fires_cycles() {
    let (guard, session, notifier, _metrics) = guard_with(Script::Bars(uptrend(20)));
    session.subscribe();
    let scheduler = JobScheduler::new(guard, parse_schedule("* * * * * *").unwrap());

    scheduler.start().await;
    tokio::time::sleep(Duration::from_millis(2200)).await;
    scheduler.stop().await;

    assert!(!notifier.sent().is_empty());
}
