//! In-process session store backing the CLI and tests.

use super::{ClientSessionLocalPersistence, ClientSessionPersistence, PersistenceError};
use crate::mqtt::ClientSession;
use crate::scheduler::PendingWill;
use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct StoreState {
    sessions: HashMap<String, ClientSession>,
    connected: HashSet<String>,
}

/// Session store kept in memory.
///
/// Pending wills are derived from disconnected sessions that still carry a
/// will, stamped with the session's persisted timestamp so that downtime
/// counts toward the delay.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: RwLock<StoreState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_session(&self, client_id: impl Into<String>, session: ClientSession) {
        self.state.write().sessions.insert(client_id.into(), session);
    }

    pub fn mark_connected(&self, client_id: &str) {
        self.state.write().connected.insert(client_id.to_string());
    }

    pub fn mark_disconnected(&self, client_id: &str) {
        self.state.write().connected.remove(client_id);
    }

    pub fn len(&self) -> usize {
        self.state.read().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot_pending(&self) -> HashMap<String, PendingWill> {
        let state = self.state.read();
        state
            .sessions
            .iter()
            .filter(|(client_id, _)| !state.connected.contains(*client_id))
            .filter_map(|(client_id, session)| {
                session
                    .effective_will_delay()
                    .filter(|delay| *delay > 0)
                    .map(|delay| (client_id.clone(), PendingWill::new(delay, session.timestamp)))
            })
            .collect()
    }
}

impl ClientSessionPersistence for MemorySessionStore {
    fn delete_will(&self, client_id: &str) -> BoxFuture<'static, Result<(), PersistenceError>> {
        if let Some(session) = self.state.write().sessions.get_mut(client_id) {
            session.will = None;
        }
        future::ready(Ok(())).boxed()
    }

    fn pending_wills(
        &self,
    ) -> BoxFuture<'static, Result<HashMap<String, PendingWill>, PersistenceError>> {
        future::ready(Ok(self.snapshot_pending())).boxed()
    }
}

impl ClientSessionLocalPersistence for MemorySessionStore {
    fn get_session(&self, client_id: &str, include_will: bool) -> Option<ClientSession> {
        let state = self.state.read();
        state.sessions.get(client_id).map(|session| {
            if include_will {
                session.clone()
            } else {
                session.without_will()
            }
        })
    }
}
