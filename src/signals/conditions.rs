//! Price position relative to EMA and Kijun-sen

use crate::models::Condition;

/// Classify the latest price against both indicator values.
///
/// `Above` requires price strictly above both, `Below` strictly below both.
/// Ties and mixed positions produce no signal.
pub fn check_conditions(price: f64, ema: f64, kijun: f64) -> Option<Condition> {
    if price > ema && price > kijun {
        Some(Condition::Above)
    } else if price < ema && price < kijun {
        Some(Condition::Below)
    } else {
        None
    }
}
