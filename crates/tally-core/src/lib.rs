//! Core types for the Tally accumulation actor.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the state the actor owns ([`Accumulator`]), the immutable copies it
//! hands out ([`Snapshot`]), and the error type callers of the bridge
//! see ([`BridgeError`]). Nothing in here touches threads or channels.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod accumulator;
pub mod error;
pub mod snapshot;

pub use accumulator::Accumulator;
pub use error::BridgeError;
pub use snapshot::Snapshot;
