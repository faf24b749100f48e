//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for
//! building on top of the relay message bus. Import this module to get
//! started quickly:
//!
//! ```rust
//! use relay::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Core
//! - [`RelayCore`] - The publish pipeline
//! - [`RelayConfig`] / [`RelayConfigBuilder`] - Validated configuration
//! - [`PublishOptions`] / [`PublishOutcome`] / [`RejectedEndpoint`] - Publish inputs and results
//! - [`RelayError`] - Top-level error taxonomy
//!
//! ## Addressing and Delivery
//! - [`Subject`] - Hierarchical subject type
//! - [`Envelope`] / [`Budget`] / [`BudgetRejection`] - Message envelopes and their safety limits
//! - [`Endpoint`] / [`EndpointRegistry`] - Registered mailboxes
//! - [`SubscriptionInfo`] / [`SubscriptionRegistry`] / [`Handler`] - Wildcard subscriptions
//!
//! ## Reliability Controls
//! - [`AccessControl`] / [`AccessDecision`] - Allow/deny rules
//! - [`RateLimiter`] / [`RateLimitDecision`] - Sliding-window rate limiting
//! - [`CircuitBreaker`] / [`CircuitState`] - Per-endpoint circuit breaking
//! - [`BackpressureGate`] / [`BackpressureDecision`] - Mailbox-depth admission
//!
//! ## Scheduling and Adapters
//! - [`Scheduler`] / [`ScheduleDefinition`] / [`Run`] - Cron-driven Pulse dispatch
//! - [`Adapter`] / [`AdapterManager`] - External channel lifecycle
//! - [`AgentRuntime`] / [`StreamEvent`] - The agent collaborator boundary
//!
//! ## Observability
//! - [`RelayMetrics`] - Combined operational snapshot
//! - [`TraceSpan`] / [`TraceStore`] - Delivery tracing
//! - [`IndexedMessage`] / [`Index`] - Durable secondary index
//!
//! # Example
//!
//! ```rust,ignore
//! use relay::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), RelayError> {
//!     let config = RelayConfig::builder().with_data_dir("./data").build()?;
//!     let core = RelayCore::new(config).await?;
//!     core.register_endpoint("relay.agent.sess1")?;
//!     Ok(())
//! }
//! ```

// Core
pub use crate::core::{PublishOptions, PublishOutcome, RejectedEndpoint, RelayCore};
pub use crate::config::{ConfigError, RelayConfig, RelayConfigBuilder};
pub use crate::error::RelayError;

// Addressing and delivery
pub use crate::envelope::{check_budget, Budget, BudgetRejection, Envelope};
pub use crate::registry::{
    endpoint_hash, Endpoint, EndpointRegistry, Handler, SubscriptionInfo, SubscriptionRegistry,
};
pub use crate::subject::Subject;

// Reliability controls
pub use crate::access::{AccessControl, AccessDecision};
pub use crate::backpressure::{BackpressureDecision, BackpressureGate};
pub use crate::breaker::{CircuitBreaker, CircuitState};
pub use crate::rate_limit::{RateLimitDecision, RateLimiter};

// Scheduling and adapters
pub use crate::adapter::{Adapter, AdapterManager};
pub use crate::agent_runtime::{AgentRuntime, StreamEvent};
pub use crate::scheduler::{Run, ScheduleDefinition, Scheduler};

// Observability
pub use crate::metrics::RelayMetrics;
pub use crate::store::{Index, IndexedMessage, TraceSpan, TraceStore};
