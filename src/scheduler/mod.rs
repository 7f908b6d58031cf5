//! Will-message delay scheduling.
//!
//! `WillScheduler` tracks, for every disconnected client with a will, how long
//! to wait before the will is published:
//! - `registration` - effective delay, immediate publish or table insert
//! - `sweep` - periodic scan firing due wills
//! - `recovery` - wholesale reload from the durable session store
//!
//! No operation blocks on publish or storage I/O. Collaborator futures are
//! spawned on the scheduler's execution handle and never awaited by callers.

mod recovery;
mod registration;
mod sweep;
pub mod table;

pub use self::sweep::SweepReport;
pub use self::table::{PendingWill, PendingWillTable};

use crate::core::config::SchedulerConfig;
use crate::mqtt::{ClientSessionWill, MetricsHolder, PublishService, WillPublish};
use crate::persistence::{ClientSessionLocalPersistence, ClientSessionPersistence};
use crate::time::{Clock, SystemClock};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("pending will recovery failed: {0}")]
    Recovery(#[from] crate::persistence::PersistenceError),
    #[error("no tokio runtime available for will delivery")]
    NoRuntime,
}

/// Collaborators the scheduler publishes through and reads sessions from.
#[derive(Clone)]
pub struct SchedulerInputs {
    pub publish: Arc<dyn PublishService>,
    pub persistence: Arc<dyn ClientSessionPersistence>,
    pub local_persistence: Arc<dyn ClientSessionLocalPersistence>,
    pub metrics: Arc<MetricsHolder>,
}

pub struct WillScheduler<C: Clock = SystemClock> {
    table: PendingWillTable,
    inputs: SchedulerInputs,
    executor: Handle,
    clock: C,
    config: SchedulerConfig,
}

impl<C: Clock> WillScheduler<C> {
    pub fn new(config: SchedulerConfig, clock: C, executor: Handle, inputs: SchedulerInputs) -> Self {
        Self {
            table: PendingWillTable::new(),
            inputs,
            executor,
            clock,
            config,
        }
    }

    /// Build on the tokio runtime the caller is running in.
    pub fn on_current_runtime(
        config: SchedulerConfig,
        clock: C,
        inputs: SchedulerInputs,
    ) -> Result<Self, SchedulerError> {
        let executor = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;
        Ok(Self::new(config, clock, executor, inputs))
    }

    /// The live pending-will table.
    pub fn table(&self) -> &PendingWillTable {
        &self.table
    }

    pub fn pending_will(&self, client_id: &str) -> Option<PendingWill> {
        self.table.get(client_id)
    }

    pub fn pending_wills(&self) -> HashMap<String, PendingWill> {
        self.table.to_map()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<MetricsHolder> {
        &self.inputs.metrics
    }

    /// Submit the will and request deletion of its durable record.
    ///
    /// Returns once both requests are handed off; their outcomes are logged by
    /// tasks on the execution handle.
    fn send_will(&self, client_id: &str, will: &ClientSessionWill) {
        let publish = WillPublish::from_will(will);
        let topic = publish.topic.clone();
        let delivery = self.inputs.publish.publish(publish, client_id);
        self.inputs.metrics.published_will_messages().inc();

        let client = client_id.to_string();
        self.executor.spawn(async move {
            match delivery.await {
                Ok(status) => {
                    tracing::debug!(client_id = %client, %topic, ?status, "will delivery settled")
                }
                Err(err) => {
                    tracing::warn!(client_id = %client, %topic, "will publish failed: {err}")
                }
            }
        });
        self.delete_durable_will(client_id);
    }

    fn delete_durable_will(&self, client_id: &str) {
        let deletion = self.inputs.persistence.delete_will(client_id);
        let client = client_id.to_string();
        self.executor.spawn(async move {
            if let Err(err) = deletion.await {
                tracing::warn!(client_id = %client, "will deletion failed: {err}");
            }
        });
    }
}
