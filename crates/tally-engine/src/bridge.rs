//! User-facing [`SyncBridge`] API and shutdown state machine.
//!
//! The bridge lets plain blocking threads use the accumulation actor
//! without seeing any channel plumbing. The actor runs on a dedicated
//! thread and owns the accumulated sequence; callers only ever hold a
//! request sender.
//!
//! # Architecture
//!
//! ```text
//! Caller Thread(s)                    Actor Thread
//!     |                                   |
//!     |--submit(v)----------------------->| requests.recv()
//!     |   [requests: unbounded | bounded] | accumulator.append(v)
//!     |   returns once enqueued           |
//!     |                                   |
//!     |--snapshot()---------------------->| requests.recv()
//!     |   creates reply bounded(1)        | accumulator.snapshot()
//!     |   blocks on reply / cancel / deadline
//!     |<--Snapshot via reply_tx-----------|
//!     |                                   |
//!     |                                   | clear_ticks (optional)
//!     |                                   | accumulator.clear()
//! ```
//!
//! Appends and snapshot requests travel on the same channel, so a
//! caller's snapshot always observes that caller's earlier submits.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{select, Receiver, Sender, TrySendError};
use tracing::{debug, info, warn};

use tally_core::{BridgeError, Snapshot};

use crate::actor::{self, Inbox};
use crate::cancel::CancelToken;
use crate::config::{BridgeConfig, ConfigError};
use crate::metrics::ActorMetrics;
use crate::request::Request;

// ── ShutdownReport ───────────────────────────────────────────────

/// Report from the shutdown state machine.
#[derive(Clone, Debug)]
pub struct ShutdownReport {
    /// Total time spent in the shutdown sequence.
    pub total_ms: u64,
    /// Whether the actor thread was joined successfully.
    pub actor_joined: bool,
    /// Lifetime counters recovered from the actor thread. `None` if the
    /// thread panicked.
    pub metrics: Option<ActorMetrics>,
}

// ── ShutdownState ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownState {
    Running,
    Draining,
    Stopped,
}

// ── BridgeHandle ─────────────────────────────────────────────────

/// Cheap, cloneable caller-side handle to a running actor.
///
/// Hand one to every producer or observer thread. A handle keeps no
/// state beyond its request sender, and it does not keep the actor
/// alive: once the owning [`SyncBridge`] shuts down, every call fails
/// with [`BridgeError::Unavailable`].
pub struct BridgeHandle<T> {
    requests: Sender<Request<T>>,
}

impl<T> Clone for BridgeHandle<T> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
        }
    }
}

impl<T> std::fmt::Debug for BridgeHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeHandle")
            .field("queued", &self.requests.len())
            .finish()
    }
}

impl<T> BridgeHandle<T> {
    /// Submit a value for accumulation. Fire-and-forget.
    ///
    /// Returns as soon as the request is enqueued; the actor applies it
    /// at some later point. Never waits for queue space: a full bounded
    /// queue is reported as [`BridgeError::QueueFull`].
    pub fn submit(&self, value: T) -> Result<(), BridgeError> {
        self.requests
            .try_send(Request::Append(value))
            .map_err(|e| match e {
                TrySendError::Full(_) => BridgeError::QueueFull,
                TrySendError::Disconnected(_) => BridgeError::Unavailable,
            })
    }

    /// Request a snapshot and block until the actor replies.
    ///
    /// Fails with [`BridgeError::ShuttingDown`] if the actor stops
    /// before answering (including while waiting for room on a full
    /// bounded queue) and with [`BridgeError::Unavailable`] if it had
    /// already stopped.
    pub fn snapshot(&self) -> Result<Snapshot<T>, BridgeError> {
        self.request_snapshot(None, None)
    }

    /// Like [`snapshot`](Self::snapshot), but returns
    /// [`BridgeError::Cancelled`] promptly once `token` fires.
    ///
    /// The request may still be processed by the actor after a cancel;
    /// its reply is simply dropped.
    pub fn snapshot_cancellable(&self, token: &CancelToken) -> Result<Snapshot<T>, BridgeError> {
        self.request_snapshot(Some(token), None)
    }

    /// Like [`snapshot`](Self::snapshot), but gives up with
    /// [`BridgeError::TimedOut`] after `timeout`.
    pub fn snapshot_timeout(&self, timeout: Duration) -> Result<Snapshot<T>, BridgeError> {
        self.request_snapshot(None, Some(timeout))
    }

    /// Number of requests queued and not yet picked up by the actor.
    pub fn queued(&self) -> usize {
        self.requests.len()
    }

    fn request_snapshot(
        &self,
        cancel: Option<&CancelToken>,
        timeout: Option<Duration>,
    ) -> Result<Snapshot<T>, BridgeError> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(BridgeError::Cancelled);
        }

        let never = crossbeam_channel::never::<()>();
        let cancelled = cancel.map_or(&never, CancelToken::signal);
        // One timer covers both the enqueue and the reply wait.
        let deadline: Receiver<Instant> =
            timeout.map_or_else(crossbeam_channel::never, crossbeam_channel::after);

        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        debug!("sending snapshot request");

        // A disconnect seen here means the actor was already gone; one seen
        // while waiting for queue room means it stopped under us.
        match self.requests.try_send(Request::Snapshot(reply_tx)) {
            Ok(()) => {}
            Err(TrySendError::Disconnected(_)) => return Err(BridgeError::Unavailable),
            Err(TrySendError::Full(request)) => {
                let enqueued = select! {
                    send(self.requests, request) -> res => {
                        res.map_err(|_| BridgeError::ShuttingDown)
                    },
                    recv(cancelled) -> _ => Err(BridgeError::Cancelled),
                    recv(deadline) -> _ => Err(BridgeError::TimedOut),
                };
                enqueued?;
            }
        }

        let reply = select! {
            recv(reply_rx) -> reply => reply.map_err(|_| BridgeError::ShuttingDown),
            recv(cancelled) -> _ => Err(BridgeError::Cancelled),
            recv(deadline) -> _ => Err(BridgeError::TimedOut),
        };
        match &reply {
            Ok(snapshot) => debug!(len = snapshot.len(), "got snapshot"),
            Err(e) => debug!(error = %e, "snapshot wait ended without reply"),
        }
        reply
    }
}

// ── SyncBridge ───────────────────────────────────────────────────

/// Owner of the accumulation actor thread.
///
/// Callers on any thread can use the bridge directly (it is `Sync` when
/// `T: Send`) or take a [`BridgeHandle`] each. Dropping the bridge
/// shuts the actor down.
pub struct SyncBridge<T = String> {
    handle: Option<BridgeHandle<T>>,
    shutdown_tx: Option<Sender<()>>,
    actor_thread: Option<JoinHandle<ActorMetrics>>,
    state: ShutdownState,
    /// Recovered from the actor thread on shutdown.
    recovered_metrics: Option<ActorMetrics>,
    /// Outcome of the join, repeated by later `shutdown` calls.
    actor_joined: bool,
    config: BridgeConfig,
}

impl<T: Clone + Send + 'static> SyncBridge<T> {
    /// Validate `config` and spawn the actor thread.
    pub fn new(config: BridgeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (request_tx, request_rx) = match config.queue_capacity {
            Some(capacity) => crossbeam_channel::bounded(capacity),
            None => crossbeam_channel::unbounded(),
        };
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
        let inbox = Inbox::new(request_rx, shutdown_rx, config.clear_interval);

        let actor_thread = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || actor::run(inbox))
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: format!("{}: {e}", config.thread_name),
            })?;

        info!(
            thread = %config.thread_name,
            queue_capacity = ?config.queue_capacity,
            clear_interval = ?config.clear_interval,
            "bridge started"
        );

        Ok(Self {
            handle: Some(BridgeHandle {
                requests: request_tx,
            }),
            shutdown_tx: Some(shutdown_tx),
            actor_thread: Some(actor_thread),
            state: ShutdownState::Running,
            recovered_metrics: None,
            actor_joined: false,
            config,
        })
    }
}

impl<T> SyncBridge<T> {
    /// A new caller-side handle, or [`BridgeError::Unavailable`] after shutdown.
    pub fn handle(&self) -> Result<BridgeHandle<T>, BridgeError> {
        self.live_handle().cloned()
    }

    /// See [`BridgeHandle::submit`].
    pub fn submit(&self, value: T) -> Result<(), BridgeError> {
        self.live_handle()?.submit(value)
    }

    /// See [`BridgeHandle::snapshot`].
    pub fn snapshot(&self) -> Result<Snapshot<T>, BridgeError> {
        self.live_handle()?.snapshot()
    }

    /// See [`BridgeHandle::snapshot_cancellable`].
    pub fn snapshot_cancellable(&self, token: &CancelToken) -> Result<Snapshot<T>, BridgeError> {
        self.live_handle()?.snapshot_cancellable(token)
    }

    /// See [`BridgeHandle::snapshot_timeout`].
    pub fn snapshot_timeout(&self, timeout: Duration) -> Result<Snapshot<T>, BridgeError> {
        self.live_handle()?.snapshot_timeout(timeout)
    }

    /// Whether the actor is still accepting requests.
    pub fn is_running(&self) -> bool {
        self.state == ShutdownState::Running
    }

    /// The configuration the bridge was started with.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Actor counters, available once the bridge has shut down.
    pub fn metrics(&self) -> Option<&ActorMetrics> {
        self.recovered_metrics.as_ref()
    }

    /// Stop the actor and join its thread.
    ///
    /// 1. **Running → Draining:** drop the bridge's request sender and
    ///    signal shutdown. The actor finishes the request in hand,
    ///    discards anything still queued (pending snapshot callers get
    ///    [`BridgeError::ShuttingDown`]) and exits.
    /// 2. **Draining → Stopped:** join the actor thread and recover its
    ///    metrics.
    ///
    /// Calling `shutdown` again is a no-op that repeats the first
    /// report's join outcome and metrics.
    pub fn shutdown(&mut self) -> ShutdownReport {
        if self.state == ShutdownState::Stopped {
            return ShutdownReport {
                total_ms: 0,
                actor_joined: self.actor_joined,
                metrics: self.recovered_metrics.clone(),
            };
        }

        let start = Instant::now();

        // Phase 1: Running → Draining
        self.state = ShutdownState::Draining;
        self.handle.take();
        self.shutdown_tx.take();

        // Phase 2: Draining → Stopped
        let actor_joined = match self.actor_thread.take().map(JoinHandle::join) {
            Some(Ok(metrics)) => {
                self.recovered_metrics = Some(metrics);
                true
            }
            Some(Err(_)) => {
                warn!("accumulation actor thread panicked");
                false
            }
            None => true,
        };
        self.actor_joined = actor_joined;
        self.state = ShutdownState::Stopped;

        let total_ms = start.elapsed().as_millis() as u64;
        info!(total_ms, actor_joined, "bridge shut down");
        ShutdownReport {
            total_ms,
            actor_joined,
            metrics: self.recovered_metrics.clone(),
        }
    }

    fn live_handle(&self) -> Result<&BridgeHandle<T>, BridgeError> {
        self.handle.as_ref().ok_or(BridgeError::Unavailable)
    }
}

impl<T> Drop for SyncBridge<T> {
    fn drop(&mut self) {
        if self.state != ShutdownState::Stopped {
            self.shutdown();
        }
    }
}

impl<T> std::fmt::Debug for SyncBridge<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncBridge")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish()
    }
}
