use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::services::notifier::Notifier;
use crate::services::telegram::messages::{
    ApiResponse, GetUpdatesRequest, SendMessageRequest, Update,
};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum TelegramError {
    /// Transport failure. The URL is stripped so the token never reaches logs.
    #[error("Telegram request failed: {0}")]
    Request(reqwest::Error),

    /// The Bot API answered `ok: false`.
    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("Invalid Telegram API URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(e: reqwest::Error) -> Self {
        TelegramError::Request(e.without_url())
    }
}

pub struct TelegramClient {
    base_url: Url,
    token: SecretString,
    client: Client,
    request_timeout: Duration,
}

impl TelegramClient {
    /// `request_timeout` bounds ordinary calls; long polls get their poll timeout on top.
    pub fn new(
        base_url: Url,
        token: SecretString,
        request_timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder().connect_timeout(request_timeout).build()?;
        Ok(Self::with_client(base_url, token, client).with_request_timeout(request_timeout))
    }

    pub fn with_client(base_url: Url, token: SecretString, client: Client) -> Self {
        Self {
            base_url,
            token,
            client,
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    fn method_url(&self, method: &str) -> Result<Url, TelegramError> {
        let mut url = self.base_url.clone();
        let bot = format!("bot{}", self.token.expose_secret());
        url.path_segments_mut()
            .map_err(|_| TelegramError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([bot.as_str(), method]);
        Ok(url)
    }

    async fn call<B, T>(
        &self,
        method: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method)?)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let reply: ApiResponse<T> = response.json().await?;
        if !reply.ok {
            return Err(TelegramError::Api(
                reply
                    .description
                    .unwrap_or_else(|| format!("{} failed", method)),
            ));
        }
        reply
            .result
            .ok_or_else(|| TelegramError::Api(format!("{} returned no result", method)))
    }

    /// Long-poll for updates after `offset`, waiting up to `poll_timeout`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: vec!["message"],
        };
        self.call("getUpdates", &request, poll_timeout + self.request_timeout)
            .await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let request = SendMessageRequest { chat_id, text };
        let _: serde_json::Value = self
            .call("sendMessage", &request, self.request_timeout)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        self.send_message(chat_id, text).await
    }
}
