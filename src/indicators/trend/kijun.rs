//! Kijun-sen (Ichimoku base line) indicator

use crate::common::math::{self, SlidingExtremum};
use crate::models::IndicatorSeries;

/// Calculate the Kijun-sen series for a specific period.
///
/// Each defined value is the midpoint of the highest high and the lowest low
/// over the trailing `period` bars, current bar included. Indices before
/// `period - 1` are `None`.
///
/// `highs` and `lows` must have the same length.
pub fn calculate_kijun_sen(highs: &[f64], lows: &[f64], period: usize) -> IndicatorSeries {
    debug_assert_eq!(highs.len(), lows.len(), "high/low series must be aligned");

    let len = highs.len().min(lows.len());
    let mut series = vec![None; len];
    if period == 0 || len < period {
        return series;
    }

    let mut highest = SlidingExtremum::max(period);
    let mut lowest = SlidingExtremum::min(period);

    for (i, (&high, &low)) in highs.iter().zip(lows).enumerate() {
        let high = highest.push(i, high);
        let low = lowest.push(i, low);
        if i + 1 >= period {
            if let (Some(high), Some(low)) = (high, low) {
                series[i] = Some(math::midpoint(high, low));
            }
        }
    }

    series
}
