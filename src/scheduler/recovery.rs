use super::{SchedulerError, WillScheduler};
use crate::time::Clock;
use std::sync::Arc;
use tokio::task::JoinHandle;

impl<C: Clock> WillScheduler<C> {
    /// Replace the in-memory table with the durable pending-will snapshot.
    ///
    /// The swap is all-or-nothing: entries known only in memory are dropped,
    /// and a failed load leaves the table as it was. Nothing is published here;
    /// due entries go out on the next sweep.
    pub async fn reset(&self) -> Result<usize, SchedulerError> {
        let loaded = self.inputs.persistence.pending_wills().await?;
        let count = loaded.len();
        let discarded = self.table.replace(loaded);
        tracing::info!(
            loaded = count,
            discarded,
            "pending wills reset from session store"
        );
        Ok(count)
    }

    /// Run `reset` on the execution handle without waiting for it.
    pub fn spawn_reset(self: &Arc<Self>) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        self.executor.spawn(async move {
            if let Err(err) = scheduler.reset().await {
                tracing::warn!("pending will reset failed; keeping current table: {err}");
            }
        })
    }
}
