//! Circuit breaker: per-endpoint CLOSED/OPEN/HALF_OPEN state
//! machine guarding delivery attempts.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// `{ enabled, failureThreshold, cooldownMs, successToClose }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitBreakerConfig {
    /// When `false`, `check` always allows and reports CLOSED.
    pub enabled: bool,
    /// Consecutive failures before CLOSED → OPEN.
    pub failure_threshold: u32,
    /// Milliseconds OPEN must elapse before probing is allowed.
    pub cooldown_ms: i64,
    /// Consecutive half-open successes before HALF_OPEN → CLOSED.
    pub success_to_close: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            failure_threshold: 5,
            cooldown_ms: 30_000,
            success_to_close: 2,
        }
    }
}

/// Lifecycle state of a single endpoint's breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitState {
    /// Normal operation.
    Closed,
    /// Rejecting immediately.
    Open,
    /// Allowing probes.
    HalfOpen,
}

#[derive(Debug, Clone)]
struct EndpointState {
    state: CircuitState,
    consecutive_failures: u32,
    half_open_successes: u32,
    opened_at: Option<DateTime<Utc>>,
}

impl EndpointState {
    fn closed() -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            half_open_successes: 0,
            opened_at: None,
        }
    }
}

/// Outcome of [`CircuitBreaker::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakerDecision {
    /// Whether the caller may attempt delivery.
    pub allowed: bool,
    /// The state after this check (a check may itself cause a transition).
    pub state: CircuitState,
    /// Rejection reason, present only when `!allowed`.
    pub reason: Option<String>,
}

/// Per-endpoint-hash circuit breaker registry.
#[derive(Debug, Default)]
pub struct CircuitBreaker {
    endpoints: RwLock<HashMap<String, EndpointState>>,
}

impl CircuitBreaker {
    /// Construct an empty breaker registry.
    pub fn new() -> Self {
        Self {
            endpoints: RwLock::new(HashMap::new()),
        }
    }

    /// Evaluate and possibly transition the breaker for `hash`. Unknown
    /// endpoints are implicitly created CLOSED.
    pub fn check(&self, hash: &str, config: &CircuitBreakerConfig, now: DateTime<Utc>) -> BreakerDecision {
        if !config.enabled {
            return BreakerDecision {
                allowed: true,
                state: CircuitState::Closed,
                reason: None,
            };
        }

        let mut endpoints = self.endpoints.write();
        let entry = endpoints.entry(hash.to_string()).or_insert_with(EndpointState::closed);

        match entry.state {
            CircuitState::Closed => BreakerDecision {
                allowed: true,
                state: CircuitState::Closed,
                reason: None,
            },
            CircuitState::Open => {
                let opened_at = entry.opened_at.unwrap_or(now);
                if (now - opened_at).num_milliseconds() >= config.cooldown_ms {
                    entry.state = CircuitState::HalfOpen;
                    entry.half_open_successes = 0;
                    BreakerDecision {
                        allowed: true,
                        state: CircuitState::HalfOpen,
                        reason: None,
                    }
                } else {
                    BreakerDecision {
                        allowed: false,
                        state: CircuitState::Open,
                        reason: Some(format!("circuit open for endpoint {hash}")),
                    }
                }
            }
            CircuitState::HalfOpen => BreakerDecision {
                allowed: true,
                state: CircuitState::HalfOpen,
                reason: None,
            },
        }
    }

    /// Record a successful delivery against `hash`.
    pub fn record_success(&self, hash: &str, config: &CircuitBreakerConfig) {
        let mut endpoints = self.endpoints.write();
        let Some(entry) = endpoints.get_mut(hash) else {
            return;
        };
        match entry.state {
            CircuitState::Closed => entry.consecutive_failures = 0,
            CircuitState::HalfOpen => {
                entry.half_open_successes += 1;
                if entry.half_open_successes >= config.success_to_close {
                    *entry = EndpointState::closed();
                }
            }
            CircuitState::Open => {}
        }
    }

    /// Record a failed delivery against `hash`, possibly opening the
    /// circuit.
    pub fn record_failure(&self, hash: &str, config: &CircuitBreakerConfig, now: DateTime<Utc>) {
        let mut endpoints = self.endpoints.write();
        let entry = endpoints.entry(hash.to_string()).or_insert_with(EndpointState::closed);
        match entry.state {
            CircuitState::Closed => {
                entry.consecutive_failures += 1;
                if entry.consecutive_failures >= config.failure_threshold {
                    entry.state = CircuitState::Open;
                    entry.opened_at = Some(now);
                }
            }
            CircuitState::HalfOpen => {
                entry.state = CircuitState::Open;
                entry.half_open_successes = 0;
                entry.opened_at = Some(now);
            }
            CircuitState::Open => {}
        }
    }

    /// Fully delete per-endpoint state for `hash`.
    pub fn reset(&self, hash: &str) {
        self.endpoints.write().remove(hash);
    }

    /// Current state of `hash`, without creating an entry.
    pub fn state_of(&self, hash: &str) -> CircuitState {
        self.endpoints
            .read()
            .get(hash)
            .map(|e| e.state)
            .unwrap_or(CircuitState::Closed)
    }
}
