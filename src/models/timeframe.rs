use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeframeError {
    #[error("Unknown timeframe code '{0}' (expected one of 1h, 1d, 5d, 1wk, 1mo)")]
    UnknownCode(String),
}

/// Sampling interval of a bar series.
///
/// The set is closed: each code maps to a fixed duration used to size the
/// lookback window when requesting history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1wk")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::OneHour,
        Timeframe::OneDay,
        Timeframe::FiveDays,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
    ];

    /// Provider interval code
    pub fn code(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1h",
            Timeframe::OneDay => "1d",
            Timeframe::FiveDays => "5d",
            Timeframe::OneWeek => "1wk",
            Timeframe::OneMonth => "1mo",
        }
    }

    pub fn duration(&self) -> Duration {
        const HOUR: u64 = 60 * 60;
        const DAY: u64 = 24 * HOUR;
        match self {
            Timeframe::OneHour => Duration::from_secs(HOUR),
            Timeframe::OneDay => Duration::from_secs(DAY),
            Timeframe::FiveDays => Duration::from_secs(5 * DAY),
            Timeframe::OneWeek => Duration::from_secs(7 * DAY),
            Timeframe::OneMonth => Duration::from_secs(30 * DAY),
        }
    }

    /// Calendar-to-trading time ratio as `(numerator, denominator)`.
    ///
    /// Hourly and daily bars are only printed on weekdays for most markets,
    /// so their calendar span is stretched by 7/5. Coarser bars already
    /// absorb weekends.
    pub fn session_ratio(&self) -> (u64, u64) {
        match self {
            Timeframe::OneHour | Timeframe::OneDay => (7, 5),
            Timeframe::FiveDays | Timeframe::OneWeek | Timeframe::OneMonth => (1, 1),
        }
    }

    /// Calendar span expected to contain `bars` samples of this timeframe
    pub fn lookback(&self, bars: usize) -> Duration {
        let (numerator, denominator) = self.session_ratio();
        let seconds = self
            .duration()
            .as_secs()
            .saturating_mul(u64::try_from(bars).unwrap_or(u64::MAX))
            .saturating_mul(numerator)
            / denominator;
        Duration::from_secs(seconds)
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.code() == s.trim())
            .ok_or_else(|| TimeframeError::UnknownCode(s.trim().to_string()))
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
