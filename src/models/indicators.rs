use serde::{Deserialize, Serialize};

/// Indicator output aligned index-for-index with its source series.
///
/// Entries before the warm-up point are `None`.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Window lengths for the two indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub ema_period: usize,
    pub kijun_period: usize,
}

impl IndicatorParams {
    pub fn new(ema_period: usize, kijun_period: usize) -> Self {
        Self {
            ema_period,
            kijun_period,
        }
    }

    /// Minimum number of bars needed before both indicators are defined
    pub fn required_bars(&self) -> usize {
        self.ema_period.max(self.kijun_period)
    }
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ema_period: 200,
            kijun_period: 26,
        }
    }
}

/// Latest price and indicator values for one instrument/timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub ema: f64,
    pub kijun: f64,
}
