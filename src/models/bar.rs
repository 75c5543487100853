use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC sample. Sequences of bars are always ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

pub fn highs(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.high).collect()
}

pub fn lows(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.low).collect()
}
