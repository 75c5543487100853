//! Cross-timeframe aggregation into a per-instrument verdict

use std::sync::Arc;
use tracing::{debug, warn};

use crate::metrics::Metrics;
use crate::models::{Condition, IndicatorParams, Instrument, Timeframe, Verdict};
use crate::services::market_data::MarketDataGateway;
use crate::signals::engine::{SignalEngine, TimeframeOutcome};

/// Combines per-timeframe conditions for one instrument into a verdict.
///
/// A verdict is only directional when every configured timeframe was
/// evaluated and all of them agree.
pub struct Aggregator {
    gateway: MarketDataGateway,
    timeframes: Vec<Timeframe>,
    params: IndicatorParams,
    metrics: Option<Arc<Metrics>>,
}

impl Aggregator {
    pub fn new(
        gateway: MarketDataGateway,
        timeframes: Vec<Timeframe>,
        params: IndicatorParams,
    ) -> Self {
        Self {
            gateway,
            timeframes,
            params,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn timeframes(&self) -> &[Timeframe] {
        &self.timeframes
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Evaluate every configured timeframe of `instrument`, in order.
    ///
    /// Stops at the first timeframe without a signal, or whose signal disagrees
    /// with an earlier one; later timeframes are never fetched.
    pub async fn evaluate_instrument(&self, instrument: &Instrument) -> Verdict {
        let required = self.params.required_bars();
        let mut conditions: Vec<Condition> = Vec::with_capacity(self.timeframes.len());

        for &timeframe in &self.timeframes {
            let bars = self.gateway.fetch(instrument, timeframe, required).await;

            match SignalEngine::evaluate_bars(&bars, &self.params) {
                TimeframeOutcome::Signal(condition) => {
                    debug!(
                        instrument = %instrument.name,
                        timeframe = %timeframe,
                        condition = %condition,
                        "{} is {} on {}",
                        instrument.name,
                        condition,
                        timeframe
                    );
                    if conditions.first().is_some_and(|&first| first != condition) {
                        debug!(
                            instrument = %instrument.name,
                            timeframe = %timeframe,
                            "timeframes disagree for {}, stopping",
                            instrument.name
                        );
                        return Verdict::None;
                    }
                    conditions.push(condition);
                }
                TimeframeOutcome::NoSignal => {
                    debug!(
                        instrument = %instrument.name,
                        timeframe = %timeframe,
                        "conditions not met for {} on {}",
                        instrument.name,
                        timeframe
                    );
                    return Verdict::None;
                }
                TimeframeOutcome::InsufficientData { bars, required } => {
                    warn!(
                        instrument = %instrument.name,
                        timeframe = %timeframe,
                        bars = bars,
                        required = required,
                        "not enough data for {} on the {} timeframe ({} < {})",
                        instrument.name,
                        timeframe,
                        bars,
                        required
                    );
                    self.record_skip();
                }
                TimeframeOutcome::IndicatorUnavailable => {
                    warn!(
                        instrument = %instrument.name,
                        timeframe = %timeframe,
                        "indicator values not available for {} on the {} timeframe",
                        instrument.name,
                        timeframe
                    );
                    self.record_skip();
                }
            }
        }

        Self::combine(&conditions, self.timeframes.len())
    }

    /// Unanimity rule: all `configured` timeframes present and identical.
    pub fn combine(conditions: &[Condition], configured: usize) -> Verdict {
        if configured == 0 || conditions.len() < configured {
            return Verdict::None;
        }
        match conditions.first() {
            Some(&first) if conditions.iter().all(|&c| c == first) => first.into(),
            _ => Verdict::None,
        }
    }

    fn record_skip(&self) {
        if let Some(ref metrics) = self.metrics {
            metrics.timeframes_skipped_total.inc();
        }
    }
}
