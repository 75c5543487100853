use chrono::DateTime;
use serde::Deserialize;

use crate::models::PriceBar;

#[derive(Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-oriented OHLC values; any entry may be null for a missing sample.
#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartError {
    pub fn message(&self) -> String {
        match &self.description {
            Some(description) => format!("{}: {}", self.code, description),
            None => self.code.clone(),
        }
    }
}

impl ChartResult {
    /// Row-oriented bars, oldest first. Samples with a null field are dropped.
    pub fn into_bars(self) -> Vec<PriceBar> {
        let Some(quote) = self.indicators.quote.into_iter().next() else {
            return Vec::new();
        };

        let mut bars: Vec<PriceBar> = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let timestamp = DateTime::from_timestamp(ts, 0)?;
                let open = (*quote.open.get(i)?)?;
                let high = (*quote.high.get(i)?)?;
                let low = (*quote.low.get(i)?)?;
                let close = (*quote.close.get(i)?)?;
                Some(PriceBar::new(open, high, low, close, timestamp))
            })
            .collect();

        bars.sort_by_key(|b| b.timestamp);
        bars
    }
}
