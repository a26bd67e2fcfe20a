//! Test fixtures for Tally development.
//!
//! Producer and observer drivers that exercise a [`BridgeHandle`] from
//! real threads, plus helpers for checking per-producer ordering in a
//! snapshot.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    parse_tagged, producer_values, spawn_observer, spawn_producers, tagged, ObserverLog,
};
