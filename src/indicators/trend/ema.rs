//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::IndicatorSeries;

/// Calculate the EMA series for a specific period.
///
/// The value at index `period - 1` is the simple average of the first `period`
/// closes; later values follow `close * k + previous * (1 - k)` with
/// `k = 2 / (period + 1)`. The output has the same length as the input and is
/// entirely `None` when there are fewer than `period` closes.
pub fn calculate_ema(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut series = vec![None; closes.len()];

    let Some(seed) = math::sma(closes, period) else {
        return series;
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut previous = seed;
    series[period - 1] = Some(seed);

    for (i, &close) in closes.iter().enumerate().skip(period) {
        previous = close * k + previous * (1.0 - k);
        series[i] = Some(previous);
    }

    series
}
