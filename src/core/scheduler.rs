//! Cron-based scheduler triggering evaluation cycles

use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::core::cycle::{CycleReport, CycleRunner};
use crate::metrics::Metrics;

/// Parse a cron expression.
///
/// Five-field expressions (`min hour day month weekday`) get a leading `0`
/// seconds field so classic crontab syntax works as well.
pub fn parse_schedule(expression: &str) -> Result<Schedule, cron::error::Error> {
    let expression = expression.trim();
    if expression.split_whitespace().count() == 5 {
        Schedule::from_str(&format!("0 {}", expression))
    } else {
        Schedule::from_str(expression)
    }
}

/// Why a cycle was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Schedule,
    Subscribe,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Schedule => f.write_str("schedule"),
            Trigger::Subscribe => f.write_str("subscribe"),
        }
    }
}

/// Serializes cycles: a trigger that arrives while a cycle is running is
/// dropped rather than queued.
#[derive(Clone)]
pub struct CycleGuard {
    runner: Arc<CycleRunner>,
    busy: Arc<Mutex<()>>,
    metrics: Option<Arc<Metrics>>,
}

impl CycleGuard {
    pub fn new(runner: Arc<CycleRunner>) -> Self {
        Self {
            runner,
            busy: Arc::new(Mutex::new(())),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.try_lock().is_err()
    }

    /// Run a cycle unless one is already in progress.
    pub async fn trigger(&self, trigger: Trigger) -> Option<CycleReport> {
        let Ok(_running) = self.busy.try_lock() else {
            warn!(
                trigger = %trigger,
                "previous cycle still running, skipping {} trigger",
                trigger
            );
            if let Some(ref metrics) = self.metrics {
                metrics.cycles_skipped_total.inc();
            }
            return None;
        };

        debug!(trigger = %trigger, "cycle started by {}", trigger);
        self.runner.run_cycle().await
    }
}

/// Scheduler that fires a guarded cycle on every upcoming cron time
pub struct JobScheduler {
    guard: CycleGuard,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    pub fn new(guard: CycleGuard, schedule: Schedule) -> Self {
        info!(cron = %schedule, "JobScheduler: created with cron '{}'", schedule);
        Self {
            guard,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        }
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let guard = self.guard.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("JobScheduler: started, waiting for cron schedule...");

            let mut last_tick: Option<chrono::DateTime<chrono::Utc>> = None;
            loop {
                let next = match last_tick {
                    Some(last) => schedule.after(&last.max(chrono::Utc::now())).next(),
                    None => schedule.upcoming(chrono::Utc).next(),
                };
                let Some(next_tick) = next else {
                    warn!("JobScheduler: schedule has no upcoming times, stopping");
                    break;
                };

                let now = chrono::Utc::now();
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    tokio::time::sleep(duration).await;
                }
                last_tick = Some(next_tick);

                info!(tick = %next_tick, "JobScheduler: cron tick");

                // The guard drops ticks that overlap a running cycle
                let guard = guard.clone();
                tokio::spawn(async move {
                    guard.trigger(Trigger::Schedule).await;
                });
            }
        });

        let mut h = self.handle.write().await;
        *h = Some(handle);
        info!("JobScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("JobScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
