//! Prometheus metrics for evaluation cycles and notifications

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub cycles_skipped_total: IntCounter,
    pub cycle_duration_seconds: Histogram,
    pub instruments_evaluated_total: IntCounter,
    pub instrument_failures_total: IntCounter,
    pub fetch_failures_total: IntCounter,
    pub timeframes_skipped_total: IntCounter,
    pub notifications_sent_total: IntCounter,
    pub subscribed: IntGauge,
    pub http_requests_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new("cycles_total", "Evaluation cycles completed")?;
        let cycles_skipped_total = IntCounter::new(
            "cycles_skipped_total",
            "Cycle triggers dropped because a cycle was already running",
        )?;
        let cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("cycle_duration_seconds", "Evaluation cycle duration")
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        )?;
        let instruments_evaluated_total = IntCounter::new(
            "instruments_evaluated_total",
            "Instruments that produced a verdict",
        )?;
        let instrument_failures_total = IntCounter::new(
            "instrument_failures_total",
            "Instruments dropped from a cycle after a timeout or panic",
        )?;
        let fetch_failures_total = IntCounter::new(
            "fetch_failures_total",
            "Upstream market data requests that failed",
        )?;
        let timeframes_skipped_total = IntCounter::new(
            "timeframes_skipped_total",
            "Timeframes excluded for insufficient history",
        )?;
        let notifications_sent_total = IntCounter::new(
            "notifications_sent_total",
            "Signal notifications pushed to the subscriber",
        )?;
        let subscribed = IntGauge::new("subscribed", "1 when the user is subscribed")?;
        let http_requests_total =
            IntCounter::new("http_requests_total", "HTTP requests served")?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(cycles_skipped_total.clone()))?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;
        registry.register(Box::new(instruments_evaluated_total.clone()))?;
        registry.register(Box::new(instrument_failures_total.clone()))?;
        registry.register(Box::new(fetch_failures_total.clone()))?;
        registry.register(Box::new(timeframes_skipped_total.clone()))?;
        registry.register(Box::new(notifications_sent_total.clone()))?;
        registry.register(Box::new(subscribed.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            cycles_skipped_total,
            cycle_duration_seconds,
            instruments_evaluated_total,
            instrument_failures_total,
            fetch_failures_total,
            timeframes_skipped_total,
            notifications_sent_total,
            subscribed,
            http_requests_total,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
