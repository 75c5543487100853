//! Inbound chat commands

/// A parsed chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Subscribe,
    Unsubscribe,
    Help,
    Unknown,
}

impl Command {
    pub const PREFIX: char = '/';

    /// Parse the first word of a message.
    ///
    /// Accepts the `/command@BotName` form and ignores trailing arguments.
    /// The mention is not compared with this bot's username: the bot only
    /// answers a single authorized private chat, where every command is
    /// addressed to it. Anything that is not one of the known commands is
    /// `Unknown`.
    pub fn parse(text: &str) -> Command {
        let Some(rest) = text.trim_start().strip_prefix(Self::PREFIX) else {
            return Command::Unknown;
        };
        let word = rest.split_whitespace().next().unwrap_or_default();
        let name = word.split('@').next().unwrap_or_default();

        match name {
            "start" => Command::Start,
            "subscribe" => Command::Subscribe,
            "unsubscribe" => Command::Unsubscribe,
            "help" => Command::Help,
            _ => Command::Unknown,
        }
    }
}
