//! One evaluation cycle: every instrument, one combined notification.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::bot::Session;
use crate::metrics::Metrics;
use crate::models::{Condition, Instrument, Verdict};
use crate::services::notifier::Notifier;
use crate::signals::aggregation::Aggregator;

pub const NOTIFICATION_HEADER: &str = "Symbols meeting the conditions:";

/// An instrument whose timeframes all agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalEntry {
    pub instrument: String,
    pub condition: Condition,
}

/// What happened to one instrument in a cycle. `verdict` is `None` when the
/// evaluation timed out or panicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentResult {
    pub instrument: Instrument,
    pub verdict: Option<Verdict>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub results: Vec<InstrumentResult>,
    pub batch: Vec<SignalEntry>,
    pub notified: bool,
}

/// Render the notification for a batch, `None` when there is nothing to send.
pub fn format_notification(batch: &[SignalEntry]) -> Option<String> {
    if batch.is_empty() {
        return None;
    }
    let lines: Vec<String> = batch
        .iter()
        .map(|entry| format!("{} - {}", entry.instrument, entry.condition))
        .collect();
    Some(format!("{}\n{}", NOTIFICATION_HEADER, lines.join("\n")))
}

pub struct CycleRunner {
    aggregator: Arc<Aggregator>,
    instruments: Vec<Instrument>,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    chat_id: i64,
    instrument_timeout: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl CycleRunner {
    pub fn new(
        aggregator: Arc<Aggregator>,
        instruments: Vec<Instrument>,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier + Send + Sync>,
        chat_id: i64,
    ) -> Self {
        Self {
            aggregator,
            instruments,
            session,
            notifier,
            chat_id,
            instrument_timeout: Duration::from_secs(60),
            metrics: None,
        }
    }

    pub fn with_instrument_timeout(mut self, instrument_timeout: Duration) -> Self {
        self.instrument_timeout = instrument_timeout;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Evaluate all instruments concurrently, each in its own task.
    ///
    /// Results keep configuration order. A timeout or panic in one instrument
    /// is logged and leaves the others untouched.
    pub async fn evaluate_all(&self) -> Vec<InstrumentResult> {
        let handles: Vec<_> = self
            .instruments
            .iter()
            .cloned()
            .map(|instrument| {
                let aggregator = self.aggregator.clone();
                let timeout = self.instrument_timeout;
                tokio::spawn(async move {
                    tokio::time::timeout(timeout, aggregator.evaluate_instrument(&instrument)).await
                })
            })
            .collect();

        let joined = join_all(handles).await;

        self.instruments
            .iter()
            .zip(joined)
            .map(|(instrument, outcome)| {
                let verdict = match outcome {
                    Ok(Ok(verdict)) => {
                        if let Some(ref metrics) = self.metrics {
                            metrics.instruments_evaluated_total.inc();
                        }
                        Some(verdict)
                    }
                    Ok(Err(_elapsed)) => {
                        error!(
                            instrument = %instrument.name,
                            timeout_secs = self.instrument_timeout.as_secs(),
                            "error processing {}: evaluation timed out",
                            instrument.name
                        );
                        self.record_failure();
                        None
                    }
                    Err(e) => {
                        error!(
                            instrument = %instrument.name,
                            error = %e,
                            "error processing {}: {}",
                            instrument.name,
                            e
                        );
                        self.record_failure();
                        None
                    }
                };
                InstrumentResult {
                    instrument: instrument.clone(),
                    verdict,
                }
            })
            .collect()
    }

    /// Run one cycle if the user is subscribed.
    ///
    /// Returns `None` when the cycle was skipped because nobody is subscribed.
    pub async fn run_cycle(&self) -> Option<CycleReport> {
        if !self.session.is_subscribed() {
            info!("user is not subscribed, skipping the check");
            return None;
        }

        let start = Instant::now();
        info!(
            instrument_count = self.instruments.len(),
            "checking {} instruments",
            self.instruments.len()
        );

        let results = self.evaluate_all().await;
        let batch: Vec<SignalEntry> = results
            .iter()
            .filter_map(|result| {
                let condition = result.verdict.and_then(|v| v.condition())?;
                Some(SignalEntry {
                    instrument: result.instrument.name.clone(),
                    condition,
                })
            })
            .collect();

        let mut notified = false;
        match format_notification(&batch) {
            Some(text) if self.session.is_subscribed() => {
                match self.notifier.send(self.chat_id, &text).await {
                    Ok(()) => {
                        info!(
                            signal_count = batch.len(),
                            "message sent to user:\n{}",
                            text
                        );
                        notified = true;
                        if let Some(ref metrics) = self.metrics {
                            metrics.notifications_sent_total.inc();
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "failed to send notification: {}", e);
                    }
                }
            }
            Some(_) => {
                info!("user unsubscribed during the check, dropping notification");
            }
            None => {
                info!("no instruments met the conditions");
            }
        }

        let elapsed = start.elapsed();
        if let Some(ref metrics) = self.metrics {
            metrics.cycles_total.inc();
            metrics.cycle_duration_seconds.observe(elapsed.as_secs_f64());
        }
        info!(
            duration_ms = elapsed.as_millis() as u64,
            signals = batch.len(),
            "cycle finished in {}ms",
            elapsed.as_millis()
        );

        Some(CycleReport {
            results,
            batch,
            notified,
        })
    }

    fn record_failure(&self) {
        if let Some(ref metrics) = self.metrics {
            metrics.instrument_failures_total.inc();
        }
    }
}
