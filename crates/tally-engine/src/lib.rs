//! Actor thread and synchronous bridge for Tally.
//!
//! Provides [`SyncBridge`], which runs a single accumulation actor on a
//! dedicated thread and exposes blocking `submit` / `snapshot` calls to
//! ordinary threads, plus the [`CancelToken`] used to abandon a blocked
//! snapshot wait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod actor;
pub mod bridge;
pub mod cancel;
pub mod config;
pub mod metrics;
mod request;

pub use bridge::{BridgeHandle, ShutdownReport, SyncBridge};
pub use cancel::CancelToken;
pub use config::{BridgeConfig, ConfigError, DEFAULT_THREAD_NAME};
pub use metrics::ActorMetrics;
