//! Common test harness utilities for integration tests.
//!
//! Provides recording fakes for the scheduler's collaborators and a harness
//! that wires them into a `WillScheduler` on the current tokio runtime.

// Not all test files use all helpers; silence dead_code warnings for unused exports.
#![allow(dead_code)]

use futures::future::{self, BoxFuture, FutureExt};
use lastwill::config::SchedulerConfig;
use lastwill::mqtt::{
    ClientSession, ClientSessionWill, MetricsHolder, PublishError, PublishService, PublishStatus,
    Qos, WillPublish,
};
use lastwill::persistence::{
    ClientSessionLocalPersistence, ClientSessionPersistence, PersistenceError,
};
use lastwill::time::SystemClock;
use lastwill::{PendingWill, SchedulerInputs, WillScheduler};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Publish service that records every submission.
#[derive(Default)]
pub struct RecordingPublisher {
    calls: Mutex<Vec<(String, WillPublish)>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    pub fn fail_deliveries(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(String, WillPublish)> {
        self.calls.lock().clone()
    }

    pub fn count_for(&self, client_id: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(id, _)| id == client_id)
            .count()
    }
}

impl PublishService for RecordingPublisher {
    fn publish(
        &self,
        publish: WillPublish,
        client_id: &str,
    ) -> BoxFuture<'static, Result<PublishStatus, PublishError>> {
        self.calls.lock().push((client_id.to_string(), publish));
        if self.fail.load(Ordering::SeqCst) {
            future::ready(Err(PublishError::Unavailable)).boxed()
        } else {
            future::ready(Ok(PublishStatus::Delivered)).boxed()
        }
    }
}

/// Durable store fake: records deletions and serves a configurable snapshot.
#[derive(Default)]
pub struct FakePersistence {
    deleted: Mutex<Vec<String>>,
    snapshot: Mutex<HashMap<String, PendingWill>>,
    fail_snapshot: AtomicBool,
    fail_deletes: AtomicBool,
}

impl FakePersistence {
    pub fn set_snapshot(&self, snapshot: HashMap<String, PendingWill>) {
        *self.snapshot.lock() = snapshot;
    }

    pub fn fail_snapshot(&self) {
        self.fail_snapshot.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }
}

impl ClientSessionPersistence for FakePersistence {
    fn delete_will(&self, client_id: &str) -> BoxFuture<'static, Result<(), PersistenceError>> {
        self.deleted.lock().push(client_id.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return future::ready(Err(PersistenceError::Unavailable("disk offline".into()))).boxed();
        }
        future::ready(Ok(())).boxed()
    }

    fn pending_wills(
        &self,
    ) -> BoxFuture<'static, Result<HashMap<String, PendingWill>, PersistenceError>> {
        if self.fail_snapshot.load(Ordering::SeqCst) {
            return future::ready(Err(PersistenceError::Unavailable("disk offline".into()))).boxed();
        }
        future::ready(Ok(self.snapshot.lock().clone())).boxed()
    }
}

/// Local session lookups backed by a plain map.
#[derive(Default)]
pub struct FakeLocalSessions {
    sessions: Mutex<HashMap<String, ClientSession>>,
}

impl FakeLocalSessions {
    pub fn put(&self, client_id: &str, session: ClientSession) {
        self.sessions.lock().insert(client_id.to_string(), session);
    }
}

impl ClientSessionLocalPersistence for FakeLocalSessions {
    fn get_session(&self, client_id: &str, include_will: bool) -> Option<ClientSession> {
        self.sessions.lock().get(client_id).map(|session| {
            if include_will {
                session.clone()
            } else {
                session.without_will()
            }
        })
    }
}

pub struct Harness {
    pub scheduler: Arc<WillScheduler>,
    pub publisher: Arc<RecordingPublisher>,
    pub persistence: Arc<FakePersistence>,
    pub local: Arc<FakeLocalSessions>,
    pub metrics: Arc<MetricsHolder>,
}

/// Build a scheduler on the current runtime. Must run inside a tokio test.
pub fn harness() -> Harness {
    let publisher = Arc::new(RecordingPublisher::default());
    let persistence = Arc::new(FakePersistence::default());
    let local = Arc::new(FakeLocalSessions::default());
    let metrics = Arc::new(MetricsHolder::new());
    let inputs = SchedulerInputs {
        publish: publisher.clone(),
        persistence: persistence.clone(),
        local_persistence: local.clone(),
        metrics: metrics.clone(),
    };
    let config = SchedulerConfig {
        sweep_interval_ms: 20,
        recover_on_start: false,
    };
    let scheduler = WillScheduler::on_current_runtime(config, SystemClock, inputs)
        .expect("tokio runtime");
    Harness {
        scheduler: Arc::new(scheduler),
        publisher,
        persistence,
        local,
        metrics,
    }
}

/// Session with a QoS 0 will on "topic", persisted at timestamp 123.
pub fn will_session(will_delay: u32, session_expiry: u32) -> ClientSession {
    let will = ClientSessionWill::new("topic", b"message".to_vec(), Qos::AtMostOnce)
        .with_origin_node("node-1")
        .with_delay_interval(will_delay);
    ClientSession::new(false, session_expiry, Some(will), 123)
}
