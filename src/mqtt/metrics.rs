//! Will scheduler metrics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for thread-safe metric updates.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Atomic gauge for current values.
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn set(&self, value: u64) {
        self.0.store(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Metrics sink shared between the scheduler and whoever exports them.
#[derive(Debug, Default)]
pub struct MetricsHolder {
    published_will_messages: Counter,
    pending_will_messages: Gauge,
}

impl MetricsHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wills handed to the publish service, immediate and delayed alike.
    pub fn published_will_messages(&self) -> &Counter {
        &self.published_will_messages
    }

    /// Table size observed at the end of the last sweep.
    pub fn pending_will_messages(&self) -> &Gauge {
        &self.pending_will_messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_accumulates() {
        let metrics = MetricsHolder::new();
        metrics.published_will_messages().inc();
        metrics.published_will_messages().inc();
        assert_eq!(metrics.published_will_messages().get(), 2);
    }

    #[test]
    fn gauge_overwrites() {
        let metrics = MetricsHolder::new();
        metrics.pending_will_messages().set(7);
        metrics.pending_will_messages().set(3);
        assert_eq!(metrics.pending_will_messages().get(), 3);
    }
}
