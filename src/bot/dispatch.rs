//! Maps an inbound message to a reply and side effects.

use crate::bot::commands::Command;
use crate::bot::session::Session;

pub const REFUSAL: &str = "You're not allowed to use this bot.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Please use /help to see available commands.";
pub const SUBSCRIBED: &str = "You have subscribed to updates.";
pub const ALREADY_SUBSCRIBED: &str = "You are already subscribed to updates.";
pub const UNSUBSCRIBED: &str = "You have unsubscribed from updates.";
pub const NOT_SUBSCRIBED: &str = "You are not currently subscribed.";
pub const HELP: &str = "Available commands:\n\
/start - Start the bot and receive a welcome message.\n\
/subscribe - Subscribe to periodic updates.\n\
/unsubscribe - Unsubscribe from updates.\n\
/help - Show this list of commands.";

/// Transport-independent view of an incoming chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub chat_id: i64,
    pub sender_name: Option<String>,
    pub text: Option<String>,
}

/// What the transport loop must do in response to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub reply: String,
    pub trigger_cycle: bool,
}

impl Dispatch {
    fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            trigger_cycle: false,
        }
    }
}

pub fn welcome(name: Option<&str>) -> String {
    format!(
        "Hello {}! Welcome...\n\
         Use /subscribe to start receiving updates.\n\
         Use /unsubscribe to stop receiving updates.\n\
         Use /help to see available commands.",
        name.unwrap_or_default()
    )
}

/// Handle one message from `inbound.chat_id`.
///
/// Messages from anyone but `authorized_id` get the fixed refusal and never
/// touch the session. Only a `/subscribe` that actually changes the state
/// asks for an immediate evaluation cycle.
pub fn dispatch(session: &Session, authorized_id: i64, inbound: &Inbound) -> Dispatch {
    if inbound.chat_id != authorized_id {
        return Dispatch::reply(REFUSAL);
    }

    let command = inbound
        .text
        .as_deref()
        .map(Command::parse)
        .unwrap_or(Command::Unknown);

    match command {
        Command::Start => Dispatch::reply(welcome(inbound.sender_name.as_deref())),
        Command::Subscribe => {
            if session.subscribe() {
                Dispatch {
                    reply: SUBSCRIBED.to_string(),
                    trigger_cycle: true,
                }
            } else {
                Dispatch::reply(ALREADY_SUBSCRIBED)
            }
        }
        Command::Unsubscribe => {
            if session.unsubscribe() {
                Dispatch::reply(UNSUBSCRIBED)
            } else {
                Dispatch::reply(NOT_SUBSCRIBED)
            }
        }
        Command::Help => Dispatch::reply(HELP),
        Command::Unknown => Dispatch::reply(UNKNOWN_COMMAND),
    }
}
