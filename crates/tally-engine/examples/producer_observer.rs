//! Tally SyncBridge: plain threads feeding and observing one actor.
//!
//! Demonstrates:
//!   1. Starting a SyncBridge with its dedicated actor thread
//!   2. A producer thread submitting a timestamp every 10 ms (fire-and-forget)
//!   3. An observer thread requesting a snapshot every 100 ms (blocking)
//!   4. Cancelling the observer's wait with a CancelToken
//!   5. Joining the callers and shutting the actor down
//!
//! Neither caller thread knows anything about channels: they call
//! `submit` and `snapshot` like any other blocking API.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example producer_observer

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tally_core::BridgeError;
use tally_engine::{BridgeConfig, CancelToken, SyncBridge};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SUBMIT_EVERY: Duration = Duration::from_millis(10);
const SNAPSHOT_EVERY: Duration = Duration::from_millis(100);
const RUN_FOR: Duration = Duration::from_secs(2);

fn now_millis() -> String {
    let since = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", since.as_secs(), since.subsec_millis())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_thread_names(true)
        .init();

    let mut bridge: SyncBridge<String> = SyncBridge::new(BridgeConfig::default())?;
    let stop = CancelToken::new();

    // ── Producer: fire-and-forget submits ───────────────────────
    let producer = {
        let handle = bridge.handle()?;
        let stop = stop.clone();
        thread::Builder::new()
            .name("producer".into())
            .spawn(move || {
                let mut sent = 0u64;
                while !stop.is_cancelled() {
                    thread::sleep(SUBMIT_EVERY);
                    let content = now_millis();
                    info!(%content, "sending content");
                    if let Err(e) = handle.submit(content) {
                        info!(error = %e, "producer stopping");
                        break;
                    }
                    sent += 1;
                }
                sent
            })?
    };

    // ── Observer: blocking snapshots ────────────────────────────
    let observer = {
        let handle = bridge.handle()?;
        let stop = stop.clone();
        thread::Builder::new()
            .name("snapshotter".into())
            .spawn(move || {
                let mut taken = 0u64;
                loop {
                    thread::sleep(SNAPSHOT_EVERY);
                    info!("sending snapshot request (synchronously)");
                    match handle.snapshot_cancellable(&stop) {
                        Ok(snapshot) => {
                            taken += 1;
                            info!(
                                len = snapshot.len(),
                                last = ?snapshot.last(),
                                "got snapshot (synchronously)"
                            );
                        }
                        Err(BridgeError::Cancelled) => break,
                        Err(e) => {
                            info!(error = %e, "observer stopping");
                            break;
                        }
                    }
                }
                taken
            })?
    };

    thread::sleep(RUN_FOR);

    // ── Interrupt and join the callers, then stop the actor ─────
    stop.cancel();
    let sent = producer.join().unwrap_or(0);
    let taken = observer.join().unwrap_or(0);

    let report = bridge.shutdown();
    info!(
        sent,
        taken,
        total_ms = report.total_ms,
        metrics = ?report.metrics,
        "done"
    );
    Ok(())
}
