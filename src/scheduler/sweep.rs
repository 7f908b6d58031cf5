use super::WillScheduler;
use crate::time::Clock;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// What one sweep over the pending-will table did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub scanned: usize,
    pub due: usize,
    pub published: usize,
    /// Due entries whose session or will had disappeared.
    pub dropped: usize,
    /// Due entries overwritten by a registration before they could be claimed.
    pub superseded: usize,
}

impl<C: Clock> WillScheduler<C> {
    /// Run one sweep: publish every will whose delay has elapsed.
    ///
    /// Works on a snapshot of the table. Each due entry is claimed by removing
    /// it before its current will is looked up and submitted, so a will fires
    /// at most once per registration.
    pub fn check_wills(&self) -> SweepReport {
        let started = self.clock.now();
        let now_millis = self.clock.epoch_millis();
        let mut report = SweepReport::default();

        for (client_id, pending) in self.table.snapshot() {
            report.scanned += 1;
            if !pending.is_due_at(now_millis) {
                continue;
            }
            report.due += 1;
            if !self.table.remove_if_unchanged(&client_id, &pending) {
                report.superseded += 1;
                continue;
            }
            let will = self
                .inputs
                .local_persistence
                .get_session(&client_id, true)
                .and_then(|session| session.will);
            match will {
                Some(will) => {
                    tracing::debug!(
                        client_id = %client_id,
                        elapsed_ms = pending.elapsed_millis(now_millis),
                        "delayed will due"
                    );
                    self.send_will(&client_id, &will);
                    report.published += 1;
                }
                None => {
                    tracing::debug!(client_id = %client_id, "no session or will left; dropping pending will");
                    report.dropped += 1;
                }
            }
        }

        self.inputs
            .metrics
            .pending_will_messages()
            .set(self.table.len() as u64);
        if report.due > 0 {
            tracing::debug!(
                scanned = report.scanned,
                published = report.published,
                dropped = report.dropped,
                superseded = report.superseded,
                elapsed_us = started.elapsed().as_micros() as u64,
                "will sweep finished"
            );
        }
        report
    }

    /// Start the periodic sweep on the execution handle.
    ///
    /// Recovers from the session store first when configured to. Sweeps run
    /// one after another inside a single task, so they never overlap; ticks
    /// missed while a sweep runs are pushed back rather than bunched up.
    pub fn start(self: &Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        let period = self.config.sweep_interval();
        self.executor.spawn(async move {
            if scheduler.config.recover_on_start {
                if let Err(err) = scheduler.reset().await {
                    tracing::warn!("initial pending will recovery failed: {err}");
                }
            }
            tracing::info!(period_ms = period.as_millis() as u64, "will sweep started");
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        scheduler.check_wills();
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::info!("will sweep stopped");
        })
    }
}
