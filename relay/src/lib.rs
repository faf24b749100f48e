//! # relay - Local, Single-Node Message Bus for the Agent Operating System
//!
//! Relay is the nervous system an agent-hosting process uses to move
//! messages between consoles, scheduled pulses, external adapters (Telegram,
//! webhooks, ...), and the agent runtimes that actually think. Every message
//! is a durable [`Envelope`] written to a crash-consistent maildir before any
//! subscriber sees it, addressed by a hierarchical dot-separated [`Subject`]
//! that may be concrete (`relay.agent.sess1`) or a wildcard pattern
//! (`relay.agent.*`, `relay.system.pulse.>`).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use relay::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), RelayError> {
//!     let config = RelayConfig::builder().with_data_dir("./data").build()?;
//!     let core = RelayCore::new(config).await?;
//!
//!     core.register_endpoint("relay.agent.sess1")?;
//!     core.subscribe("relay.agent.*", std::sync::Arc::new(|subject, payload, _envelope| {
//!         println!("{subject}: {payload}");
//!     }))?;
//!
//!     let outcome = core
//!         .publish(
//!             "relay.agent.sess1",
//!             serde_json::json!({"content": "hello"}),
//!             PublishOptions {
//!                 from: "relay.human.console.c1".to_string(),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! ## Addressing and Delivery
//! - [`subject`] - Hierarchical subject parsing, validation, and wildcard matching
//! - [`envelope`] - Envelopes and their hop/TTL/call-budget safety limits
//! - [`maildir`] - Crash-consistent per-endpoint mailbox storage
//! - [`registry`] - Endpoint and subscription registries
//!
//! ## Reliability Controls
//! - [`access`] - File-backed, hot-reloaded allow/deny rules
//! - [`rate_limit`] - Sliding-window per-sender rate limiting
//! - [`breaker`] - Per-endpoint circuit breaker
//! - [`backpressure`] - Mailbox-depth admission control
//!
//! ## Orchestration
//! - [`core`] - [`RelayCore`], the publish pipeline tying every control together
//! - [`receiver`] - Bridges agent/pulse subjects into an [`agent_runtime::AgentRuntime`]
//! - [`scheduler`] - Cron-driven Pulse dispatch
//! - [`adapter`] - External channel (Telegram, webhook, ...) lifecycle management
//! - [`signal`] - In-process lifecycle event pub/sub
//!
//! ## Observability and Configuration
//! - [`store`] - Durable secondary index and delivery trace store (SQLite)
//! - [`metrics`] - Combined operational snapshot
//! - [`config`] - Validated [`RelayConfig`] builder
//! - [`error`] - Top-level [`error::RelayError`] taxonomy
//! - [`http`] - Console submit/stream, trace, metrics, and dead-letter HTTP surface
//!
//! # Architecture Principles
//!
//! ## Crash Consistency First
//! Every delivery lands in `tmp/` before an atomic rename makes it visible in
//! `new/`. The SQLite index and trace store are rebuildable caches,
//! never the source of truth: [`core::RelayCore::new`] rebuilds the index
//! from the maildir tree whenever it finds no `index.db` on disk.
//!
//! ## Collaborator Boundaries
//! Relay never spawns or owns an agent process. [`agent_runtime::AgentRuntime`]
//! and [`adapter::Adapter`] are narrow async traits; concrete implementations
//! live outside this crate.
//!
//! ## Closed Error Taxonomies
//! Each component exposes its own `thiserror`-derived error enum
//! (`MaildirError`, `AccessControlError`, `SchedulerError`, ...), all folding
//! into [`error::RelayError`] via `#[from]`, so callers match on one error
//! type regardless of which subsystem raised it.

pub mod access;
pub mod adapter;
pub mod agent_runtime;
pub mod backpressure;
pub mod breaker;
pub mod config;
pub mod core;
pub mod envelope;
pub mod error;
pub mod http;
pub mod maildir;
pub mod metrics;
pub mod prelude;
pub mod rate_limit;
pub mod receiver;
pub mod registry;
pub mod scheduler;
pub mod signal;
pub mod store;
pub mod subject;

// Re-export commonly used types
pub use access::{AccessAction, AccessControl, AccessControlError, AccessDecision, AccessRule};
pub use adapter::{
    validate_numeric_chat_id, Adapter, AdapterError, AdapterManager, AdapterState,
    AdapterStatusSnapshot, DeliveryResult, EchoGuard, RelayPublisher,
};
pub use agent_runtime::{
    AgentRuntime, AgentRuntimeError, PermissionMode, SendMessageOptions, SessionOptions,
    StreamEvent,
};
pub use backpressure::{BackpressureConfig, BackpressureDecision, BackpressureGate};
pub use breaker::{BreakerDecision, CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use config::{ConfigError, RelayConfig, RelayConfigBuilder};
pub use core::{PublishOptions, PublishOutcome, RejectedEndpoint, RelayCore};
pub use envelope::{check_budget, Budget, BudgetRejection, Envelope};
pub use error::RelayError;
pub use maildir::{DeadLetter, MailboxBox, MaildirError, MaildirStore};
pub use metrics::RelayMetrics;
pub use rate_limit::{RateLimitConfig, RateLimitDecision, RateLimiter};
pub use receiver::MessageReceiver;
pub use registry::{
    endpoint_hash, CancellationHandle, Endpoint, EndpointRegistry, EndpointRegistryError, Handler,
    SubscriptionError, SubscriptionInfo, SubscriptionRegistry,
};
pub use scheduler::{
    DispatchOutcome, InMemoryRunStore, PulseRunStore, Run, RunStatus, ScheduleDefinition,
    ScheduleStatus, Scheduler, SchedulerError,
};
pub use signal::{Signal, SignalEmitter, SignalHandler};
pub use store::{
    DeliveryMetrics, Index, IndexError, IndexMetrics, IndexedMessage, MessageStatus, SpanStatus,
    SpanUpdate, TraceSpan, TraceStore, TraceStoreError,
};
pub use subject::{Subject, SubjectError};
