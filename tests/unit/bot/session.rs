//! Unit tests for the subscription session

use signalbot::bot::Session;

#[test]
fn test_starts_unsubscribed() {
    assert!(!Session::new().is_subscribed());
}

#[test]
fn test_subscribe_reports_state_change() {
    let session = Session::new();
    assert!(session.subscribe());
    assert!(session.is_subscribed());
    assert!(!session.subscribe());
    assert!(session.is_subscribed());
}

#[test]
fn test_unsubscribe_reports_state_change() {
    let session = Session::new();
    assert!(!session.unsubscribe());
    session.subscribe();
    assert!(session.unsubscribe());
    assert!(!session.is_subscribed());
}
