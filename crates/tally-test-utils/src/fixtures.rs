//! Reusable producer/observer fixtures.
//!
//! - [`spawn_producers`]: P threads each submitting M tagged values.
//! - [`spawn_observer`]: one thread snapshotting on an interval until cancelled.
//! - [`tagged`] / [`parse_tagged`] / [`producer_values`]: value encoding
//!   that lets a test recover which producer sent what, in which order.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use tally_core::{BridgeError, Snapshot};
use tally_engine::{BridgeHandle, CancelToken};

/// Encode `(producer, seq)` as a submitted value: `"p{producer}-{seq}"`.
pub fn tagged(producer: usize, seq: usize) -> String {
    format!("p{producer}-{seq}")
}

/// Inverse of [`tagged`]. `None` for values not produced by it.
pub fn parse_tagged(value: &str) -> Option<(usize, usize)> {
    let rest = value.strip_prefix('p')?;
    let (producer, seq) = rest.split_once('-')?;
    Some((producer.parse().ok()?, seq.parse().ok()?))
}

/// Sequence numbers contributed by `producer`, in snapshot order.
pub fn producer_values(values: &[String], producer: usize) -> Vec<usize> {
    values
        .iter()
        .filter_map(|v| parse_tagged(v))
        .filter(|&(p, _)| p == producer)
        .map(|(_, seq)| seq)
        .collect()
}

/// Spawn `producers` threads, each submitting `per_producer` tagged
/// values in order. Each thread returns the first submit error, if any.
pub fn spawn_producers(
    handle: &BridgeHandle<String>,
    producers: usize,
    per_producer: usize,
) -> Vec<JoinHandle<Result<(), BridgeError>>> {
    (0..producers)
        .map(|p| {
            let handle = handle.clone();
            thread::Builder::new()
                .name(format!("tally-producer-{p}"))
                .spawn(move || {
                    for seq in 0..per_producer {
                        handle.submit(tagged(p, seq))?;
                    }
                    Ok(())
                })
                .expect("failed to spawn producer")
        })
        .collect()
}

/// What an observer thread saw before it stopped.
#[derive(Debug)]
pub struct ObserverLog {
    /// Every snapshot received, in the order they were returned.
    pub snapshots: Vec<Snapshot<String>>,
    /// The error that ended the loop.
    pub ended_with: BridgeError,
}

/// Spawn an observer that snapshots every `interval` until a snapshot
/// call fails (normally because `token` was cancelled).
pub fn spawn_observer(
    handle: &BridgeHandle<String>,
    token: &CancelToken,
    interval: Duration,
) -> JoinHandle<ObserverLog> {
    let handle = handle.clone();
    let token = token.clone();
    thread::Builder::new()
        .name("tally-observer".into())
        .spawn(move || {
            let mut snapshots = Vec::new();
            loop {
                match handle.snapshot_cancellable(&token) {
                    Ok(snap) => snapshots.push(snap),
                    Err(ended_with) => {
                        return ObserverLog {
                            snapshots,
                            ended_with,
                        }
                    }
                }
                thread::sleep(interval);
            }
        })
        .expect("failed to spawn observer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_round_trip() {
        assert_eq!(parse_tagged(&tagged(3, 17)), Some((3, 17)));
    }

    #[test]
    fn parse_rejects_foreign_values() {
        assert_eq!(parse_tagged("hello"), None);
        assert_eq!(parse_tagged("p-1"), None);
        assert_eq!(parse_tagged("px-1"), None);
    }

    #[test]
    fn producer_values_filters_and_keeps_order() {
        let values = vec![
            tagged(0, 0),
            tagged(1, 0),
            tagged(0, 1),
            "noise".to_string(),
            tagged(1, 1),
            tagged(0, 2),
        ];
        assert_eq!(producer_values(&values, 0), vec![0, 1, 2]);
        assert_eq!(producer_values(&values, 1), vec![0, 1]);
        assert!(producer_values(&values, 2).is_empty());
    }
}
