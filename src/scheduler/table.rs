use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Scheduling state for one disconnected client's will.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PendingWill {
    /// Effective delay in seconds, fixed at registration.
    pub delay_interval: u32,
    /// Disconnect instant (Unix epoch millis).
    pub start_timestamp: u64,
}

impl PendingWill {
    pub fn new(delay_interval: u32, start_timestamp: u64) -> Self {
        Self {
            delay_interval,
            start_timestamp,
        }
    }

    pub fn elapsed_millis(&self, now_millis: u64) -> u64 {
        now_millis.saturating_sub(self.start_timestamp)
    }

    /// A will is due once the full delay has passed; reaching it exactly counts.
    pub fn is_due_at(&self, now_millis: u64) -> bool {
        self.elapsed_millis(now_millis) >= u64::from(self.delay_interval) * 1_000
    }
}

/// Client id to pending will, safe for concurrent use without caller locking.
///
/// Entries live in a sharded map. The outer lock is taken exclusively only
/// when the whole map is swapped, so registrations never wait on each other.
#[derive(Debug, Default)]
pub struct PendingWillTable {
    entries: RwLock<Arc<DashMap<String, PendingWill>>>,
}

impl PendingWillTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the superseded entry.
    pub fn insert(&self, client_id: String, will: PendingWill) -> Option<PendingWill> {
        self.entries.read().insert(client_id, will)
    }

    pub fn get(&self, client_id: &str) -> Option<PendingWill> {
        self.entries.read().get(client_id).map(|entry| *entry.value())
    }

    pub fn remove(&self, client_id: &str) -> Option<PendingWill> {
        self.entries
            .read()
            .remove(client_id)
            .map(|(_, will)| will)
    }

    /// Remove the entry only if it still holds `expected`.
    ///
    /// A registration that overwrote the entry in the meantime wins.
    pub fn remove_if_unchanged(&self, client_id: &str, expected: &PendingWill) -> bool {
        self.entries
            .read()
            .remove_if(client_id, |_, current| current == expected)
            .is_some()
    }

    /// Point-in-time copy of the entries, taken without blocking writers.
    pub fn snapshot(&self) -> Vec<(String, PendingWill)> {
        let entries = self.entries.read().clone();
        entries
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn to_map(&self) -> HashMap<String, PendingWill> {
        self.snapshot().into_iter().collect()
    }

    /// Swap in a new set of entries wholesale; returns how many were dropped.
    pub fn replace(&self, wills: HashMap<String, PendingWill>) -> usize {
        let next: DashMap<String, PendingWill> = wills.into_iter().collect();
        let previous = std::mem::replace(&mut *self.entries.write(), Arc::new(next));
        previous.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
