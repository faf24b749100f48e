//! Relay-wide configuration with sensible defaults.

// Layer 1: Standard library
use std::path::{Path, PathBuf};

// Layer 2: Third-party
use serde::{Deserialize, Serialize};

// Layer 3: Internal
use crate::backpressure::BackpressureConfig;
use crate::breaker::CircuitBreakerConfig;
use crate::envelope::{DEFAULT_CALL_BUDGET, DEFAULT_MAX_HOPS, DEFAULT_TTL_MS};
use crate::rate_limit::RateLimitConfig;

/// Default feature-flag state for `relay_enabled`.
pub const DEFAULT_RELAY_ENABLED: bool = true;

/// Top-level configuration for a [`crate::core::RelayCore`] instance.
///
/// A builder-with-validation shape covering Relay's own knobs: the
/// on-disk data directory, budget defaults, and the admission-control
/// subsystem configs.
///
/// # Examples
///
/// ```rust
/// use relay::config::RelayConfig;
///
/// let config = RelayConfig::default();
/// assert!(config.relay_enabled);
///
/// let config = RelayConfig::builder()
///     .with_data_dir("/var/lib/relay")
///     .with_max_hops(3)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_hops, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayConfig {
    /// Root directory for mailboxes, registries, and SQLite databases.
    pub data_dir: PathBuf,

    /// Default `maxHops` applied to envelopes that don't override it.
    pub max_hops: u32,

    /// Default envelope time-to-live, in milliseconds.
    pub default_ttl_ms: i64,

    /// Default `callBudgetRemaining` applied to fresh envelopes.
    pub default_call_budget: u32,

    /// Rate limiter configuration.
    pub rate_limit: RateLimitConfig,

    /// Circuit breaker configuration.
    pub circuit_breaker: CircuitBreakerConfig,

    /// Backpressure gate configuration.
    pub backpressure: BackpressureConfig,

    /// `RELAY_ENABLED` feature flag; when `false`, console and
    /// scheduler fall back to direct agent-runtime calls.
    pub relay_enabled: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./relay-data"),
            max_hops: DEFAULT_MAX_HOPS,
            default_ttl_ms: DEFAULT_TTL_MS,
            default_call_budget: DEFAULT_CALL_BUDGET,
            rate_limit: RateLimitConfig::default(),
            circuit_breaker: CircuitBreakerConfig::default(),
            backpressure: BackpressureConfig::default(),
            relay_enabled: DEFAULT_RELAY_ENABLED,
        }
    }
}

impl RelayConfig {
    /// Create a new configuration builder.
    pub fn builder() -> RelayConfigBuilder {
        RelayConfigBuilder::default()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hops == 0 {
            return Err(ConfigError::Invalid("max_hops must be > 0".to_string()));
        }
        if self.default_ttl_ms <= 0 {
            return Err(ConfigError::Invalid(
                "default_ttl_ms must be > 0".to_string(),
            ));
        }
        if self.rate_limit.window_secs <= 0 {
            return Err(ConfigError::Invalid(
                "rate_limit.window_secs must be > 0".to_string(),
            ));
        }
        if self.circuit_breaker.failure_threshold == 0 {
            return Err(ConfigError::Invalid(
                "circuit_breaker.failure_threshold must be > 0".to_string(),
            ));
        }
        if self.backpressure.max_mailbox_size == 0 {
            return Err(ConfigError::Invalid(
                "backpressure.max_mailbox_size must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.backpressure.pressure_warning_at) {
            return Err(ConfigError::Invalid(
                "backpressure.pressure_warning_at must be within [0.0, 1.0]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`RelayConfig`] with a fluent API.
#[derive(Debug, Default)]
pub struct RelayConfigBuilder {
    config: RelayConfig,
}

impl RelayConfigBuilder {
    /// Set the on-disk data directory.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the default `maxHops` budget value.
    pub fn with_max_hops(mut self, max_hops: u32) -> Self {
        self.config.max_hops = max_hops;
        self
    }

    /// Set the default envelope TTL, in milliseconds.
    pub fn with_default_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.config.default_ttl_ms = ttl_ms;
        self
    }

    /// Set the default call budget.
    pub fn with_default_call_budget(mut self, call_budget: u32) -> Self {
        self.config.default_call_budget = call_budget;
        self
    }

    /// Replace the rate limiter configuration.
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.config.rate_limit = rate_limit;
        self
    }

    /// Replace the circuit breaker configuration.
    pub fn with_circuit_breaker(mut self, circuit_breaker: CircuitBreakerConfig) -> Self {
        self.config.circuit_breaker = circuit_breaker;
        self
    }

    /// Replace the backpressure gate configuration.
    pub fn with_backpressure(mut self, backpressure: BackpressureConfig) -> Self {
        self.config.backpressure = backpressure;
        self
    }

    /// Set the `relay_enabled` feature flag.
    pub fn with_relay_enabled(mut self, enabled: bool) -> Self {
        self.config.relay_enabled = enabled;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<RelayConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Errors raised while building or validating a [`RelayConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value failed validation.
    #[error("invalid relay configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = RelayConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.relay_enabled);
        assert_eq!(config.max_hops, DEFAULT_MAX_HOPS);
    }

    #[test]
    fn test_builder_overrides() {
        let config = RelayConfig::builder()
            .with_data_dir("/tmp/relay-test")
            .with_max_hops(3)
            .with_default_call_budget(5)
            .with_relay_enabled(false)
            .build()
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/relay-test"));
        assert_eq!(config.max_hops, 3);
        assert_eq!(config.default_call_budget, 5);
        assert!(!config.relay_enabled);
    }

    #[test]
    fn test_validation_zero_max_hops() {
        let result = RelayConfig::builder().with_max_hops(0).build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("max_hops"));
    }

    #[test]
    fn test_validation_zero_ttl() {
        let result = RelayConfig::builder().with_default_ttl_ms(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_bad_pressure_ratio() {
        let mut backpressure = BackpressureConfig::default();
        backpressure.pressure_warning_at = 1.5;
        let result = RelayConfig::builder()
            .with_backpressure(backpressure)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = RelayConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RelayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.max_hops, deserialized.max_hops);
        assert_eq!(config.relay_enabled, deserialized.relay_enabled);
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RelayConfig>();
    }
}
