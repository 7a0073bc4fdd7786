//! Scheduler execution logic

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::{watch, Mutex};
use tokio::time::MissedTickBehavior;

use crate::config::ScheduleConfig;
use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::report::Report;
use crate::traits::Producer;

use super::batch::batch_size;
use super::completion::Completion;

/// The scheduling and aggregation engine
///
/// Holds the process-wide schedule configuration. Each `produce` call is an
/// independent run: concurrent runs share nothing but the tokio runtime.
#[derive(Debug, Clone)]
pub struct Scheduler {
    schedule: ScheduleConfig,
}

impl Scheduler {
    /// Create a scheduler from a validated schedule configuration
    pub fn new(schedule: ScheduleConfig) -> Result<Self> {
        schedule.validate()?;
        Ok(Self { schedule })
    }

    /// The configured schedule
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    /// Run to completion: tick at the configured period, dispatch batches,
    /// and resolve once the target count of successes has accumulated
    ///
    /// Blocks the calling task until the run's completion signal fires, then
    /// returns the final report. The periodic timer is released before this
    /// returns; invocations still in flight drain without affecting the
    /// returned report.
    pub async fn produce(&self, context: RunContext) -> Result<Report> {
        let start = Instant::now();
        let batch_size = batch_size(&context, &self.schedule);
        let target = context.total_count();

        tracing::info!(
            producer = context.producer().name(),
            total_count = target,
            batch_size,
            period = self.schedule.period,
            unit = %self.schedule.unit,
            "starting producer run"
        );

        if target == 0 {
            // Target already met; no timer is ever started.
            tracing::info!("target count is zero, nothing to produce");
            return Ok(Report::new());
        }

        let run = Run {
            producer: Arc::clone(context.producer()),
            batch_size,
            target,
            report: Arc::new(Mutex::new(Report::new())),
            completion: Completion::new(),
        };

        // The sender side lives in this future: if the caller drops the
        // `produce` call, the tick loop observes the closed channel and
        // releases the timer instead of ticking forever.
        let (_cancel_tx, cancel_rx) = watch::channel(());
        let ticker = tokio::spawn(tick_loop(
            run.clone(),
            self.schedule.tick_period(),
            cancel_rx,
        ));

        let total = run.completion.wait().await;

        // The tick loop exits on its own once the completion resolves; joining
        // it here releases the timer unconditionally before we hand back the
        // report.
        ticker
            .await
            .map_err(|e| Error::Scheduler(format!("tick loop failed: {e}")))?;

        let report = run.report.lock().await.clone();
        tracing::info!(total, elapsed = ?start.elapsed(), "producer run complete");
        Ok(report)
    }
}

/// Per-run state shared between the tick loop and its batch tasks
///
/// The report, completion signal, and aggregation lock are private to one
/// run; nothing here is shared across runs.
#[derive(Clone)]
struct Run {
    producer: Arc<dyn Producer>,
    batch_size: u64,
    target: u64,
    report: Arc<Mutex<Report>>,
    completion: Completion,
}

/// Periodic dispatch loop for one run
///
/// Fires immediately, then every `period`. Each tick spawns its batch as an
/// independent task, so a slow batch never delays the next tick. The loop
/// observes the completion signal before every tick and stops dispatching the
/// instant it resolves.
async fn tick_loop(run: Run, period: Duration, mut cancel: watch::Receiver<()>) {
    let mut interval = tokio::time::interval(period);
    // Fixed-rate semantics: missed ticks burst to catch up, holding the
    // long-term cadence rather than shifting every subsequent tick.
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        tokio::select! {
            biased;

            _ = run.completion.wait() => {
                tracing::debug!("completion resolved, stopping tick loop");
                break;
            }

            res = cancel.changed() => {
                // Err: the owning `produce` call was dropped by its caller.
                if res.is_err() {
                    tracing::debug!("run aborted by caller, stopping tick loop");
                    break;
                }
            }

            _ = interval.tick() => {
                tokio::spawn(run_batch(run.clone()));
            }
        }
    }
}

/// Dispatch one tick's batch and fold its results into the report
///
/// Aggregation runs under the per-run lock: concurrent batches apply their
/// contributions one at a time, and the threshold check happens under the
/// same lock so the completion signal is fulfilled by exactly one batch.
async fn run_batch(run: Run) {
    let batch_start = Instant::now();

    let delivered = if run.batch_size > 1 {
        let mut invocations = Vec::with_capacity(run.batch_size as usize);
        for _ in 0..run.batch_size {
            invocations.push(tokio::spawn(invoke_one(Arc::clone(&run.producer))));
        }

        let mut delivered = 0u64;
        for joined in join_all(invocations).await {
            match joined {
                Ok(count) => delivered += count,
                Err(e) => {
                    // A panicked invocation counts as a miss, same as Err.
                    tracing::error!(error = %e, "producer invocation task panicked");
                }
            }
        }
        delivered
    } else {
        invoke_one(Arc::clone(&run.producer)).await
    };

    let mut report = run.report.lock().await;
    // Clamp to the remainder so the final total lands exactly on the target
    // even when the last batch delivers more successes than still needed.
    let applied = delivered.min(run.target.saturating_sub(report.total_count()));
    report.update_total_count(applied);
    let total = report.total_count();

    tracing::debug!(
        delivered,
        applied,
        total,
        elapsed = ?batch_start.elapsed(),
        "batch aggregated"
    );

    if total >= run.target && run.completion.fulfill(total) {
        tracing::debug!(total, "target count reached");
    }
}

/// Invoke the producer once and convert the outcome to a success count
///
/// A fault from the capability is recovered as a miss and surfaced through
/// the log, never through aggregation.
async fn invoke_one(producer: Arc<dyn Producer>) -> u64 {
    match producer.produce().await {
        Ok(true) => 1,
        Ok(false) => 0,
        Err(e) => {
            tracing::warn!(
                producer = producer.name(),
                error = %e,
                "producer invocation failed"
            );
            0
        }
    }
}
