//! Indicator engine: pure functions over price series.

pub mod trend;

pub use trend::*;

use crate::models::IndicatorSeries;

/// Tail value of an indicator series, `None` when empty or still warming up.
pub fn latest(series: &IndicatorSeries) -> Option<f64> {
    series.last().copied().flatten()
}
