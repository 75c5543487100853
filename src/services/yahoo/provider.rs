use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::models::{PriceBar, Timeframe};
use crate::services::market_data::{MarketDataProvider, ProviderError};
use crate::services::yahoo::response::ChartResponse;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// The chart endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) signalbot/0.1";

pub struct YahooFinanceProvider {
    base_url: Url,
    client: Client,
}

impl YahooFinanceProvider {
    /// Create a provider whose requests give up after `timeout`.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: Url, client: Client) -> Self {
        Self { base_url, client }
    }

    fn chart_url(&self, symbol: &str) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::InvalidRequest(format!("invalid base URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    async fn get_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        bars: usize,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let period2 = Utc::now();
        let period1 = chrono::Duration::from_std(timeframe.lookback(bars))
            .ok()
            .and_then(|lookback| period2.checked_sub_signed(lookback))
            .ok_or_else(|| {
                ProviderError::InvalidRequest(format!(
                    "lookback of {} {} bars is out of range",
                    bars, timeframe
                ))
            })?;

        let url = self.chart_url(symbol)?;
        debug!(
            symbol = %symbol,
            interval = timeframe.code(),
            period1 = period1.timestamp(),
            period2 = period2.timestamp(),
            "requesting chart for {}",
            symbol
        );

        let response = self
            .client
            .get(url)
            .query(&[
                ("period1", period1.timestamp().to_string()),
                ("period2", period2.timestamp().to_string()),
                ("interval", timeframe.code().to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let parsed = serde_json::from_str::<ChartResponse>(&body);
        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.chart.error)
                .map(|e| e.message())
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(ProviderError::Api(message));
        }

        let chart = parsed
            .map_err(|e| ProviderError::Malformed(e.to_string()))?
            .chart;
        if let Some(error) = chart.error {
            return Err(ProviderError::Api(error.message()));
        }

        let result = chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::Malformed(format!("no chart result for {}", symbol)))?;

        Ok(result.into_bars())
    }
}
