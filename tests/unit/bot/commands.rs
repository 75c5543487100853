//! Unit tests for command parsing

use signalbot::bot::Command;

#[test]
fn test_known_commands() {
    assert_eq!(Command::parse("/start"), Command::Start);
    assert_eq!(Command::parse("/subscribe"), Command::Subscribe);
    assert_eq!(Command::parse("/unsubscribe"), Command::Unsubscribe);
    assert_eq!(Command::parse("/help"), Command::Help);
}

#[test]
fn test_bot_mention_and_arguments_are_ignored() {
    assert_eq!(Command::parse("/subscribe@SignalBot"), Command::Subscribe);
    assert_eq!(Command::parse("/help me please"), Command::Help);
    assert_eq!(Command::parse("  /unsubscribe"), Command::Unsubscribe);
}

#[test]
fn test_any_bot_mention_is_accepted() {
    assert_eq!(Command::parse("/subscribe@SomeOtherBot"), Command::Subscribe);
    assert_eq!(Command::parse("/start@"), Command::Start);
}

#[test]
fn test_unknown_input() {
    assert_eq!(Command::parse("/foo"), Command::Unknown);
    assert_eq!(Command::parse("/"), Command::Unknown);
    assert_eq!(Command::parse("hello"), Command::Unknown);
    assert_eq!(Command::parse(""), Command::Unknown);
    assert_eq!(Command::parse("/Start"), Command::Unknown);
}
