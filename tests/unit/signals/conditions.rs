//! Unit tests for the price/indicator classification

use signalbot::models::Condition;
use signalbot::signals::conditions::check_conditions;

#[test]
fn test_above_both() {
    assert_eq!(check_conditions(105.0, 100.0, 102.0), Some(Condition::Above));
}

#[test]
fn test_below_both() {
    assert_eq!(check_conditions(95.0, 100.0, 102.0), Some(Condition::Below));
}

#[test]
fn test_between_indicators_is_no_signal() {
    assert_eq!(check_conditions(101.0, 100.0, 102.0), None);
    assert_eq!(check_conditions(101.0, 102.0, 100.0), None);
}

#[test]
fn test_ties_are_no_signal() {
    assert_eq!(check_conditions(100.0, 100.0, 99.0), None);
    assert_eq!(check_conditions(99.0, 100.0, 99.0), None);
    assert_eq!(check_conditions(100.0, 100.0, 100.0), None);
}
