//! Simulate command - disconnects a batch of clients and waits for their wills.

use crate::cli::args::SimulateArgs;
use crate::config::Config;
use crate::mqtt::{ClientSession, ClientSessionWill, LoggingPublisher, MetricsHolder, Qos};
use crate::persistence::MemorySessionStore;
use crate::scheduler::{SchedulerInputs, WillScheduler};
use crate::telemetry;
use crate::time::{Clock, SystemClock};
use anyhow::{bail, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

pub async fn run_simulate(args: SimulateArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.validate()?;
    telemetry::init_tracing(config.telemetry.log_level.as_deref())?;

    let store = Arc::new(MemorySessionStore::new());
    let metrics = Arc::new(MetricsHolder::new());
    let inputs = SchedulerInputs {
        publish: Arc::new(LoggingPublisher),
        persistence: store.clone(),
        local_persistence: store.clone(),
        metrics: metrics.clone(),
    };
    let clock = SystemClock;
    let scheduler = Arc::new(WillScheduler::on_current_runtime(
        config.scheduler.clone(),
        clock.clone(),
        inputs,
    )?);

    for i in 0..args.clients {
        let client_id = format!("sim-{i}");
        let will = ClientSessionWill::new(
            format!("devices/{client_id}/status"),
            b"offline".to_vec(),
            Qos::AtLeastOnce,
        )
        .with_delay_interval(args.will_delay)
        .with_origin_node("simulator");
        let session = ClientSession::new(false, args.session_expiry, Some(will), clock.epoch_millis());
        store.put_session(client_id.clone(), session.clone());
        scheduler.add_will(&client_id, &session);
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = scheduler.start(shutdown_rx);
    let started = Instant::now();
    let deadline = Duration::from_secs(args.timeout);
    let expected = u64::from(args.clients);

    while metrics.published_will_messages().get() < expected || !scheduler.table().is_empty() {
        if started.elapsed() >= deadline {
            let _ = shutdown_tx.send(true);
            bail!(
                "timed out after {}s with {} of {} wills published",
                args.timeout,
                metrics.published_will_messages().get(),
                expected
            );
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let _ = shutdown_tx.send(true);
    sweeper.await?;
    println!(
        "published {} wills for {} clients in {:.2}s",
        metrics.published_will_messages().get(),
        args.clients,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
