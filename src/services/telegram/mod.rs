//! Telegram Bot API transport (long polling)

pub mod client;
pub mod messages;

pub use client::*;
pub use messages::*;
