//! Single-timeframe evaluation: bars in, condition out.

use crate::indicators::{calculate_ema, calculate_kijun_sen, latest};
use crate::models::bar::{closes, highs, lows};
use crate::models::{Condition, IndicatorParams, IndicatorSnapshot, PriceBar};
use crate::signals::conditions::check_conditions;

/// Result of evaluating one timeframe of one instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeframeOutcome {
    /// Price sits on the same side of both indicators
    Signal(Condition),
    /// Tie or mixed position
    NoSignal,
    /// Fewer bars than the longer indicator period
    InsufficientData { bars: usize, required: usize },
    /// Enough bars, but an indicator has no value at the latest index
    IndicatorUnavailable,
}

pub struct SignalEngine;

impl SignalEngine {
    pub fn evaluate_bars(bars: &[PriceBar], params: &IndicatorParams) -> TimeframeOutcome {
        let required = params.required_bars();
        if bars.len() < required {
            return TimeframeOutcome::InsufficientData {
                bars: bars.len(),
                required,
            };
        }

        match Self::snapshot(bars, params) {
            Some(snapshot) => match check_conditions(snapshot.price, snapshot.ema, snapshot.kijun) {
                Some(condition) => TimeframeOutcome::Signal(condition),
                None => TimeframeOutcome::NoSignal,
            },
            None => TimeframeOutcome::IndicatorUnavailable,
        }
    }

    /// Latest close together with the latest EMA and Kijun-sen values
    pub fn snapshot(bars: &[PriceBar], params: &IndicatorParams) -> Option<IndicatorSnapshot> {
        let closes = closes(bars);
        let ema = latest(&calculate_ema(&closes, params.ema_period))?;
        let kijun = latest(&calculate_kijun_sen(
            &highs(bars),
            &lows(bars),
            params.kijun_period,
        ))?;
        let price = *closes.last()?;

        Some(IndicatorSnapshot { price, ema, kijun })
    }
}
