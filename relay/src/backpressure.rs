//! Backpressure gate: per-endpoint admission based on the index's live
//! `new/` count.

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// `{ maxMailboxSize, pressureWarningAt }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackpressureConfig {
    /// Reject once `currentSize >= maxMailboxSize`.
    pub max_mailbox_size: u32,
    /// Pressure ratio (0.0-1.0) above which a warning is logged.
    pub pressure_warning_at: f64,
}

impl Default for BackpressureConfig {
    fn default() -> Self {
        Self {
            max_mailbox_size: 10_000,
            pressure_warning_at: 0.8,
        }
    }
}

/// Outcome of [`BackpressureGate::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct BackpressureDecision {
    /// Whether the publish may proceed.
    pub allowed: bool,
    /// Rejection reason, present only when `!allowed`.
    pub reason: Option<String>,
    /// `currentSize / maxMailboxSize`, always computed (observability only).
    pub pressure: f64,
}

/// Stateless admission gate; the live mailbox size comes from the index's
/// per-endpoint new-message count.
#[derive(Debug, Clone, Default)]
pub struct BackpressureGate;

impl BackpressureGate {
    /// Construct a gate. Stateless: all configuration is passed per call.
    pub fn new() -> Self {
        Self
    }

    /// Reject once `current_size >= config.max_mailbox_size`. Also computes
    /// `pressure`, logging a warning when it crosses `pressureWarningAt`;
    /// this never causes rejection on its own.
    pub fn check(&self, hash: &str, current_size: u32, config: &BackpressureConfig) -> BackpressureDecision {
        let pressure = if config.max_mailbox_size == 0 {
            1.0
        } else {
            current_size as f64 / config.max_mailbox_size as f64
        };
        if pressure >= config.pressure_warning_at {
            tracing::warn!(
                endpoint_hash = hash,
                current_size,
                max = config.max_mailbox_size,
                pressure,
                "endpoint mailbox approaching capacity"
            );
        }
        if current_size >= config.max_mailbox_size {
            BackpressureDecision {
                allowed: false,
                reason: Some(format!(
                    "mailbox full: {current_size}/{} messages",
                    config.max_mailbox_size
                )),
                pressure,
            }
        } else {
            BackpressureDecision {
                allowed: true,
                reason: None,
                pressure,
            }
        }
    }
}
