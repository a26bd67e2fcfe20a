//! The accumulation actor: one thread, one inbox, one owner of the data.
//!
//! The actor thread owns an [`Accumulator`] exclusively (moved in via
//! `thread::spawn`). No locks: requests arrive on a single crossbeam
//! channel and are handled strictly in arrival order, and snapshot
//! replies go back via per-request bounded(1) channels.
//!
//! Append and Snapshot requests share one channel on purpose. A thread
//! that submits and then snapshots must see its own submit, which only
//! holds if both requests are queued behind each other.

use std::time::{Duration, Instant};

use crossbeam_channel::{select, Receiver};
use tracing::{debug, info, trace, warn};

use tally_core::Accumulator;

use crate::metrics::ActorMetrics;
use crate::request::Request;

/// Channels the actor loop waits on.
pub(crate) struct Inbox<T> {
    /// Append and snapshot requests, FIFO across all callers.
    pub requests: Receiver<Request<T>>,
    /// Disconnects (or fires) when the owning bridge shuts down.
    pub shutdown: Receiver<()>,
    /// Ticks of the optional clear interval; `never()` when disabled.
    pub clear_ticks: Receiver<Instant>,
}

impl<T> Inbox<T> {
    pub fn new(
        requests: Receiver<Request<T>>,
        shutdown: Receiver<()>,
        clear_interval: Option<Duration>,
    ) -> Self {
        Self {
            requests,
            shutdown,
            clear_ticks: clear_interval.map_or_else(crossbeam_channel::never, crossbeam_channel::tick),
        }
    }
}

/// Why the actor loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StopReason {
    /// The bridge signalled shutdown.
    Shutdown,
    /// Every request sender (bridge and handles) was dropped.
    Disconnected,
}

enum Step {
    Continue,
    Stop(StopReason),
}

/// State held by the actor loop.
pub(crate) struct ActorState<T> {
    accumulator: Accumulator<T>,
    metrics: ActorMetrics,
}

impl<T: Clone> ActorState<T> {
    pub fn new() -> Self {
        Self {
            accumulator: Accumulator::new(),
            metrics: ActorMetrics::default(),
        }
    }

    /// Apply one request. Never fails.
    pub fn handle(&mut self, request: Request<T>) {
        match request {
            Request::Append(value) => {
                self.accumulator.append(value);
                self.metrics.appends_processed += 1;
                trace!(len = self.accumulator.len(), "received submission");
            }
            Request::Snapshot(reply) => {
                let snapshot = self.accumulator.snapshot();
                self.metrics.snapshots_served += 1;
                debug!(
                    len = snapshot.len(),
                    appended = snapshot.appended(),
                    "received snapshot request"
                );
                // Best-effort reply: the caller may have been cancelled.
                if reply.send(snapshot).is_err() {
                    self.metrics.replies_abandoned += 1;
                    debug!("snapshot reply abandoned by caller");
                }
            }
        }
    }

    /// Periodic clear from the optional ticker.
    pub fn clear(&mut self) {
        let removed = self.accumulator.clear();
        self.metrics.clears += 1;
        self.metrics.values_cleared += removed as u64;
        debug!(removed, "clearing content");
    }

    /// Drop everything still queued. Pending snapshot callers observe
    /// their reply channel disconnecting.
    fn discard_pending(&mut self, requests: &Receiver<Request<T>>) {
        let mut discarded = 0u64;
        while let Ok(request) = requests.try_recv() {
            trace!(kind = request.kind(), "discarding queued request");
            discarded += 1;
        }
        if discarded > 0 {
            warn!(discarded, "discarded queued requests at shutdown");
        }
        self.metrics.discarded_on_shutdown += discarded;
    }

    /// Final counters, with the peak length folded in.
    fn into_metrics(self) -> ActorMetrics {
        ActorMetrics {
            peak_len: self.accumulator.peak_len(),
            ..self.metrics
        }
    }

    #[cfg(test)]
    pub fn accumulator(&self) -> &Accumulator<T> {
        &self.accumulator
    }

    #[cfg(test)]
    pub fn metrics(&self) -> &ActorMetrics {
        &self.metrics
    }
}

/// Main actor loop. Runs until shutdown is signalled or every sender
/// has been dropped, then returns the lifetime metrics.
pub(crate) fn run<T: Clone>(inbox: Inbox<T>) -> ActorMetrics {
    let mut state = ActorState::new();
    info!("accumulation actor started");

    let reason = loop {
        let step = select! {
            recv(inbox.requests) -> msg => match msg {
                Ok(request) => {
                    state.handle(request);
                    Step::Continue
                }
                Err(_) => Step::Stop(StopReason::Disconnected),
            },
            // A message or a disconnect both mean stop.
            recv(inbox.shutdown) -> _ => Step::Stop(StopReason::Shutdown),
            recv(inbox.clear_ticks) -> _ => {
                state.clear();
                Step::Continue
            },
        };
        if let Step::Stop(reason) = step {
            break reason;
        }
    };

    state.discard_pending(&inbox.requests);
    let metrics = state.into_metrics();
    info!(
        ?reason,
        appends = metrics.appends_processed,
        snapshots = metrics.snapshots_served,
        "accumulation actor stopped"
    );
    metrics
}
