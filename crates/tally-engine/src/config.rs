//! Bridge configuration, validation, and error types.
//!
//! [`BridgeConfig`] is the input for [`SyncBridge::new`](crate::SyncBridge::new).
//! [`validate()`](BridgeConfig::validate) checks structural invariants
//! before any thread is spawned.

use std::time::Duration;

use thiserror::Error;

/// Default name of the actor thread.
pub const DEFAULT_THREAD_NAME: &str = "tally-actor";

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`BridgeConfig`] or starting the actor.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `queue_capacity` was `Some(0)`; a zero-capacity queue rejects every submit.
    #[error("queue_capacity must be at least 1")]
    QueueCapacityZero,
    /// `clear_interval` was `Some(Duration::ZERO)`.
    #[error("clear_interval must be non-zero, got {value:?}")]
    InvalidClearInterval {
        /// The rejected interval.
        value: Duration,
    },
    /// Thread name is empty or contains a NUL byte.
    #[error("invalid actor thread name: {reason}")]
    InvalidThreadName {
        /// Which rule the name broke.
        reason: String,
    },
    /// The actor thread could not be spawned.
    #[error("thread spawn failed: {reason}")]
    ThreadSpawnFailed {
        /// The OS error message.
        reason: String,
    },
}

// ── BridgeConfig ───────────────────────────────────────────────────

/// Configuration for a [`SyncBridge`](crate::SyncBridge).
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Capacity of the request queue. `None` = unbounded (default).
    ///
    /// With a bound, `submit` never waits for room: a full queue is
    /// reported as [`BridgeError::QueueFull`](tally_core::BridgeError::QueueFull).
    pub queue_capacity: Option<usize>,
    /// If set, the actor clears its accumulated sequence on every tick
    /// of this interval. Default: `None` (append-only).
    pub clear_interval: Option<Duration>,
    /// Name given to the actor thread. Default: `"tally-actor"`.
    pub thread_name: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: None,
            clear_interval: None,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == Some(0) {
            return Err(ConfigError::QueueCapacityZero);
        }
        if let Some(interval) = self.clear_interval {
            if interval.is_zero() {
                return Err(ConfigError::InvalidClearInterval { value: interval });
            }
        }
        if self.thread_name.is_empty() {
            return Err(ConfigError::InvalidThreadName {
                reason: "name is empty".to_string(),
            });
        }
        // std::thread::Builder panics on interior NULs.
        if self.thread_name.contains('\0') {
            return Err(ConfigError::InvalidThreadName {
                reason: "name contains a NUL byte".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = BridgeConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.queue_capacity, None);
        assert_eq!(cfg.clear_interval, None);
        assert_eq!(cfg.thread_name, DEFAULT_THREAD_NAME);
    }

    #[test]
    fn zero_queue_capacity_fails() {
        let cfg = BridgeConfig {
            queue_capacity: Some(0),
            ..BridgeConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::QueueCapacityZero) => {}
            other => panic!("expected QueueCapacityZero, got {other:?}"),
        }
    }

    #[test]
    fn bounded_queue_is_valid() {
        let cfg = BridgeConfig {
            queue_capacity: Some(1),
            ..BridgeConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_clear_interval_fails() {
        let cfg = BridgeConfig {
            clear_interval: Some(Duration::ZERO),
            ..BridgeConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidClearInterval { value }) => assert!(value.is_zero()),
            other => panic!("expected InvalidClearInterval, got {other:?}"),
        }
    }

    #[test]
    fn empty_thread_name_fails() {
        let cfg = BridgeConfig {
            thread_name: String::new(),
            ..BridgeConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidThreadName { .. }) => {}
            other => panic!("expected InvalidThreadName, got {other:?}"),
        }
    }

    #[test]
    fn nul_in_thread_name_fails() {
        let cfg = BridgeConfig {
            thread_name: "tally\0actor".to_string(),
            ..BridgeConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidThreadName { reason }) => assert!(reason.contains("NUL")),
            other => panic!("expected InvalidThreadName, got {other:?}"),
        }
    }

    #[test]
    fn thread_spawn_failed_error_display() {
        let err = ConfigError::ThreadSpawnFailed {
            reason: "resource limit".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("thread spawn failed"));
        assert!(msg.contains("resource limit"));
    }
}
