//! Errors surfaced to callers of the synchronous bridge.
//!
//! The actor itself has no failure states: every value is accepted and
//! every snapshot succeeds. Everything here describes what can go wrong
//! on the caller's side of the channel.

use thiserror::Error;

/// Failure outcome of a `submit` or `snapshot` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum BridgeError {
    /// The actor has shut down. Terminal: no later call will succeed.
    #[error("accumulation actor is unavailable (shut down)")]
    Unavailable,
    /// The caller cancelled its own wait before a reply arrived.
    #[error("snapshot wait was cancelled by the caller")]
    Cancelled,
    /// The actor stopped while this snapshot request was outstanding.
    #[error("accumulation actor shut down before replying")]
    ShuttingDown,
    /// The request queue is bounded and currently full.
    #[error("request queue is full")]
    QueueFull,
    /// The snapshot deadline elapsed before a reply arrived.
    #[error("timed out waiting for snapshot reply")]
    TimedOut,
}

impl BridgeError {
    /// Whether this outcome means the wait was aborted rather than refused.
    ///
    /// True for caller cancellation and for actor shutdown while the
    /// request was in flight.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::ShuttingDown)
    }

    /// Whether retrying the same call can never succeed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Unavailable | Self::ShuttingDown)
    }
}
