//! Tally: a single-owner accumulation actor reachable from plain threads.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Tally sub-crates. For most users, adding `tally` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tally::prelude::*;
//!
//! let mut bridge: SyncBridge<String> = SyncBridge::new(BridgeConfig::default()).unwrap();
//!
//! bridge.submit("a".to_string()).unwrap();
//! bridge.submit("b".to_string()).unwrap();
//! assert_eq!(bridge.snapshot().unwrap().into_vec(), vec!["a", "b"]);
//!
//! // Hand a handle to another thread; its submits are visible to its own
//! // later snapshots.
//! let handle = bridge.handle().unwrap();
//! std::thread::spawn(move || {
//!     handle.submit("c".to_string()).unwrap();
//!     assert!(handle.snapshot().unwrap().contains(&"c".to_string()));
//! })
//! .join()
//! .unwrap();
//!
//! let report = bridge.shutdown();
//! assert_eq!(report.metrics.unwrap().appends_processed, 3);
//! assert_eq!(bridge.submit("late".to_string()), Err(BridgeError::Unavailable));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tally-core` | `Accumulator`, `Snapshot`, `BridgeError` |
//! | [`engine`] | `tally-engine` | `SyncBridge`, `BridgeHandle`, `CancelToken`, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`tally-core`).
///
/// The actor's state ([`types::Accumulator`]), the copies it hands out
/// ([`types::Snapshot`]), and the caller-facing [`types::BridgeError`].
pub use tally_core as types;

/// Actor thread and synchronous bridge (`tally-engine`).
pub use tally_engine as engine;

/// Common imports for typical Tally usage.
///
/// ```rust
/// use tally::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tally_core::{BridgeError, Snapshot};

    // Engine
    pub use tally_engine::{
        ActorMetrics, BridgeConfig, BridgeHandle, CancelToken, ConfigError, ShutdownReport,
        SyncBridge,
    };
}
