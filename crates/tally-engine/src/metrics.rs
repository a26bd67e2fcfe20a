//! Counters collected by the actor thread over its lifetime.
//!
//! [`ActorMetrics`] is owned by the actor loop and returned through the
//! thread's `JoinHandle` at shutdown, so it needs no atomics.

/// Lifetime counters for one actor run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorMetrics {
    /// Append requests applied to the sequence.
    pub appends_processed: u64,
    /// Snapshot requests answered (whether or not the caller was still waiting).
    pub snapshots_served: u64,
    /// Snapshot replies nobody collected because the caller gave up.
    pub replies_abandoned: u64,
    /// Periodic clears performed.
    pub clears: u64,
    /// Values removed by periodic clears.
    pub values_cleared: u64,
    /// Requests still queued when the actor stopped, dropped unprocessed.
    pub discarded_on_shutdown: u64,
    /// Largest length the sequence reached.
    pub peak_len: usize,
}
