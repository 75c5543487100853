//! Inbound message loop: long-polls the chat API and dispatches commands

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::bot::{dispatch, Inbound, Session};
use crate::core::cycle::CycleReport;
use crate::core::scheduler::{CycleGuard, Trigger};
use crate::metrics::Metrics;
use crate::services::notifier::Notifier;
use crate::services::telegram::{Message, TelegramClient, TelegramError};

/// Configuration for the bot runtime
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub authorized_id: i64,
    pub poll_timeout: Duration,
    pub retry_delay: Duration,
}

impl RuntimeConfig {
    pub fn new(authorized_id: i64) -> Self {
        Self {
            authorized_id,
            poll_timeout: Duration::from_secs(30),
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// Bot runtime owning the update offset and the command side effects
pub struct BotRuntime {
    config: RuntimeConfig,
    client: Arc<TelegramClient>,
    session: Arc<Session>,
    guard: CycleGuard,
    metrics: Option<Arc<Metrics>>,
}

impl BotRuntime {
    pub fn new(
        config: RuntimeConfig,
        client: Arc<TelegramClient>,
        session: Arc<Session>,
        guard: CycleGuard,
    ) -> Self {
        Self {
            config,
            client,
            session,
            guard,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Reply to one message and, after a fresh `/subscribe`, start a cycle.
    ///
    /// Returns the handle of the triggered cycle, if any.
    pub async fn handle_message(
        &self,
        message: &Message,
    ) -> Option<JoinHandle<Option<CycleReport>>> {
        let inbound = Inbound {
            chat_id: message.chat.id,
            sender_name: message.sender_name(),
            text: message.text.clone(),
        };

        let outcome = dispatch(&self.session, self.config.authorized_id, &inbound);
        if inbound.chat_id != self.config.authorized_id {
            warn!(
                chat_id = inbound.chat_id,
                "rejected message from unauthorized chat {}",
                inbound.chat_id
            );
        } else {
            debug!(text = ?inbound.text, "command received");
        }

        if let Some(ref metrics) = self.metrics {
            metrics.subscribed.set(i64::from(self.session.is_subscribed()));
        }

        if let Err(e) = self.client.send(inbound.chat_id, &outcome.reply).await {
            error!(chat_id = inbound.chat_id, error = %e, "failed to send reply: {}", e);
        }

        if outcome.trigger_cycle {
            info!("user subscribed, running an immediate check");
            let guard = self.guard.clone();
            Some(tokio::spawn(async move { guard.trigger(Trigger::Subscribe).await }))
        } else {
            None
        }
    }

    /// Fetch and handle one batch of updates; returns the next offset.
    pub async fn poll_once(&self, offset: Option<i64>) -> Result<Option<i64>, TelegramError> {
        let updates = self
            .client
            .get_updates(offset, self.config.poll_timeout)
            .await?;

        let mut next = offset;
        for update in updates {
            next = Some(update.update_id + 1);
            if let Some(ref message) = update.message {
                self.handle_message(message).await;
            }
        }
        Ok(next)
    }

    /// Poll forever; failed polls are logged and retried after a delay.
    pub async fn run(self: Arc<Self>) {
        info!(
            authorized_id = self.config.authorized_id,
            "BotRuntime: listening for commands"
        );
        let mut offset = None;
        loop {
            match self.poll_once(offset).await {
                Ok(next) => offset = next,
                Err(e) => {
                    warn!(error = %e, "BotRuntime: polling failed: {}", e);
                    tokio::time::sleep(self.config.retry_delay).await;
                }
            }
        }
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
