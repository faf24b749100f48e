//! Rate limiter: sliding window per sender subject, with
//! longest-prefix overrides.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// `{ enabled, windowSecs, maxPerWindow, perSenderOverrides }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    /// When `false`, every check allows unconditionally.
    pub enabled: bool,
    /// Sliding window width.
    pub window_secs: i64,
    /// Default per-sender limit within the window.
    pub max_per_window: u32,
    /// `sender subject prefix -> limit`, longest-prefix-wins.
    #[serde(default)]
    pub per_sender_overrides: HashMap<String, u32>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_secs: 60,
            max_per_window: 100,
            per_sender_overrides: HashMap::new(),
        }
    }
}

/// Outcome of [`RateLimiter::check_rate_limit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the publish may proceed.
    pub allowed: bool,
    /// Rejection reason, present only when `!allowed`.
    pub reason: Option<String>,
    /// The count that was evaluated, present only when `!allowed`.
    pub current_count: Option<u32>,
    /// The limit that was evaluated, present only when `!allowed`.
    pub limit: Option<u32>,
}

impl RateLimitDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            current_count: None,
            limit: None,
        }
    }

    fn reject(count: u32, limit: u32, window_secs: i64) -> Self {
        Self {
            allowed: false,
            reason: Some(format!(
                "rate limit exceeded: {count}/{limit} messages in {window_secs}s window"
            )),
            current_count: Some(count),
            limit: Some(limit),
        }
    }
}

/// Stateless sliding-window rate limiter; the live count comes from the
/// index.
#[derive(Debug, Clone, Default)]
pub struct RateLimiter;

impl RateLimiter {
    /// Construct a limiter. Stateless: all configuration is passed per call.
    pub fn new() -> Self {
        Self
    }

    /// Select the longest literal-prefix match in `config.perSenderOverrides`
    /// for `sender`; fall back to `config.maxPerWindow`. An empty override
    /// map means "use the default".
    pub fn resolve_limit(&self, sender: &str, config: &RateLimitConfig) -> u32 {
        config
            .per_sender_overrides
            .iter()
            .filter(|(prefix, _)| sender.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, limit)| *limit)
            .unwrap_or(config.max_per_window)
    }

    /// `count < limit` allows; otherwise reject with the canonical message.
    /// When `!config.enabled`, always allows and omits diagnostics.
    pub fn check_rate_limit(
        &self,
        sender: &str,
        count: u32,
        config: &RateLimitConfig,
    ) -> RateLimitDecision {
        if !config.enabled {
            return RateLimitDecision::allow();
        }
        let limit = self.resolve_limit(sender, config);
        if count < limit {
            RateLimitDecision::allow()
        } else {
            RateLimitDecision::reject(count, limit, config.window_secs)
        }
    }
}
