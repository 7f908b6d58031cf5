//! Session store seams consumed by the will scheduler.
//!
//! The durable store owns will records and the pending-will snapshot used on
//! recovery; the local store answers session lookups during sweeps.

pub mod memory;

pub use self::memory::MemorySessionStore;

use crate::mqtt::ClientSession;
use crate::scheduler::PendingWill;
use futures::future::BoxFuture;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
    #[error("session store corrupt: {0}")]
    Corrupt(String),
}

/// Durable, cluster-visible session persistence.
pub trait ClientSessionPersistence: Send + Sync {
    /// Drop the stored will for a client. Deleting an absent will succeeds.
    fn delete_will(&self, client_id: &str) -> BoxFuture<'static, Result<(), PersistenceError>>;

    /// Every pending will as last durably recorded.
    fn pending_wills(
        &self,
    ) -> BoxFuture<'static, Result<HashMap<String, PendingWill>, PersistenceError>>;
}

/// Node-local session lookups; never blocks on I/O.
pub trait ClientSessionLocalPersistence: Send + Sync {
    fn get_session(&self, client_id: &str, include_will: bool) -> Option<ClientSession>;
}
