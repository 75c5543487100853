//! Market data provider interface and the degrading gateway in front of it.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::Metrics;
use crate::models::{Instrument, PriceBar, Timeframe};

/// Errors that can occur within a `MarketDataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure or timeout.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream API answered with an error status or error payload.
    #[error("API error: {0}")]
    Api(String),

    /// The request could not be built; nothing was sent upstream.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response could not be interpreted as a bar series.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait MarketDataProvider {
    /// Historical bars for `symbol`, oldest first, covering enough samples of
    /// `timeframe` for `bars` indicator inputs.
    async fn get_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        bars: usize,
    ) -> Result<Vec<PriceBar>, ProviderError>;
}

/// Extra bars requested on top of the longest indicator period.
pub const LOOKBACK_BUFFER: usize = 50;

/// Front door to the market data provider used by the aggregator.
///
/// Upstream failures never escape: they are logged and turned into an empty
/// series, which the aggregator treats as insufficient history.
#[derive(Clone)]
pub struct MarketDataGateway {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    metrics: Option<Arc<Metrics>>,
}

impl MarketDataGateway {
    pub fn new(provider: Arc<dyn MarketDataProvider + Send + Sync>) -> Self {
        Self {
            provider,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fetch the bars backing indicators that need `required` samples.
    pub async fn fetch(
        &self,
        instrument: &Instrument,
        timeframe: Timeframe,
        required: usize,
    ) -> Vec<PriceBar> {
        let wanted = required + LOOKBACK_BUFFER;
        match self
            .provider
            .get_bars(&instrument.symbol, timeframe, wanted)
            .await
        {
            Ok(bars) => {
                debug!(
                    instrument = %instrument.name,
                    timeframe = %timeframe,
                    count = bars.len(),
                    "fetched {} bars for {} on {}",
                    bars.len(),
                    instrument.name,
                    timeframe
                );
                bars
            }
            Err(e) => {
                warn!(
                    instrument = %instrument.name,
                    symbol = %instrument.symbol,
                    timeframe = %timeframe,
                    error = %e,
                    "error fetching data for {} on {}",
                    instrument.name,
                    timeframe
                );
                if let Some(ref metrics) = self.metrics {
                    metrics.fetch_failures_total.inc();
                }
                Vec::new()
            }
        }
    }
}
