//! Outbound message channel used by the cycle and the command dispatcher.

use async_trait::async_trait;

use crate::services::telegram::TelegramError;

#[async_trait]
pub trait Notifier {
    /// Push a plain-text message to `chat_id`.
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), TelegramError>;
}
