//! Benchmark profiles and utilities for the Tally bridge.
//!
//! - [`bench_config`]: bridge configuration used by every benchmark
//! - [`prefilled_bridge`]: a running bridge already holding `n` values
//! - [`payload`]: deterministic value generator

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tally_core::BridgeError;
use tally_engine::{BridgeConfig, ConfigError, SyncBridge};

/// Failure to build a benchmark fixture.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The bridge refused its configuration or could not spawn.
    #[error("bridge failed to start: {0}")]
    Config(#[from] ConfigError),
    /// A submit or snapshot during prefill failed.
    #[error("prefill request failed: {0}")]
    Bridge(#[from] BridgeError),
    /// The actor reported a different number of values than submitted.
    #[error("prefill applied {applied} of {expected} values")]
    ShortPrefill {
        /// Values submitted.
        expected: usize,
        /// Values seen in the confirming snapshot.
        applied: usize,
    },
}

/// Unbounded queue, no periodic clear, a recognisable thread name.
pub fn bench_config() -> BridgeConfig {
    BridgeConfig {
        thread_name: "tally-bench-actor".to_string(),
        ..BridgeConfig::default()
    }
}

/// A 32-byte value, roughly the size of a timestamp string.
pub fn payload(i: usize) -> String {
    format!("{i:032}")
}

/// Start a bridge and submit `n` values, waiting until the actor has
/// applied them all.
pub fn prefilled_bridge(n: usize) -> Result<SyncBridge<String>, SetupError> {
    let bridge = SyncBridge::new(bench_config())?;
    for i in 0..n {
        bridge.submit(payload(i))?;
    }
    // The snapshot is queued behind every submit above.
    let applied = bridge.snapshot()?.len();
    if applied != n {
        return Err(SetupError::ShortPrefill {
            expected: n,
            applied,
        });
    }
    Ok(bridge)
}
