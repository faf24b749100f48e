//! Adapters: bridges between a remote channel (Telegram, a generic webhook,
//! ...) and Relay.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{instrument, warn};

// Layer 3: Internal module imports
use crate::envelope::Envelope;

/// Reconnect backoff schedule: 5 attempts, widening delays.
pub const RECONNECT_BACKOFF_MS: [u64; 5] = [5_000, 10_000, 30_000, 60_000, 120_000];

/// Failure modes for adapter lifecycle and delivery.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// `start`/`testConnection` could not reach the remote channel.
    #[error("adapter connection failed: {0}")]
    ConnectionFailed(String),

    /// An externally supplied chat id failed strict validation.
    #[error("invalid chat id: {0}")]
    InvalidChatId(String),

    /// Outbound delivery to the remote channel failed.
    #[error("adapter delivery failed: {0}")]
    DeliveryFailed(String),

    /// `start` called on an adapter that is already running.
    #[error("adapter {0} already started")]
    AlreadyStarted(String),

    /// `stop`/`deliver` called on an adapter that was never started.
    #[error("adapter {0} not started")]
    NotStarted(String),

    /// No adapter is registered for the requested id.
    #[error("no adapter registered with id {0}")]
    UnknownAdapter(String),

    /// Reconnect attempts were exhausted per the bounded backoff schedule.
    #[error("max reconnection attempts exhausted")]
    ReconnectExhausted,
}

/// Runtime state of an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterState {
    /// Never started, or fully stopped.
    Disconnected,
    /// `start` is in flight or a reconnect attempt is pending.
    Connecting,
    /// Actively bridging traffic.
    Connected,
    /// The last connection attempt failed.
    Error,
    /// `stop` is in flight.
    Stopping,
}

/// Outcome of a single outbound [`Adapter::deliver`] call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResult {
    /// Whether the remote channel accepted the message.
    pub success: bool,
    /// Failure reason, present only when `!success`.
    pub error: Option<String>,
    /// Whether the adapter itself recorded a dead letter for this attempt.
    pub dead_lettered: Option<bool>,
    /// The remote channel's own message id, if one was returned.
    pub response_message_id: Option<String>,
    /// Wall-clock duration of the delivery attempt, in milliseconds.
    pub duration_ms: Option<i64>,
}

/// A point-in-time snapshot of an adapter's runtime state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterStatusSnapshot {
    /// Current lifecycle state.
    pub state: AdapterState,
    /// Count of messages received from the remote channel.
    pub inbound_count: u64,
    /// Count of messages delivered to the remote channel.
    pub outbound_count: u64,
    /// Count of delivery/connection failures observed.
    pub error_count: u64,
    /// The most recent error message, if any.
    pub last_error: Option<String>,
    /// When this adapter last transitioned to `Connected`.
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for AdapterStatusSnapshot {
    fn default() -> Self {
        Self {
            state: AdapterState::Disconnected,
            inbound_count: 0,
            outbound_count: 0,
            error_count: 0,
            last_error: None,
            started_at: None,
        }
    }
}

/// The narrow publishing capability an adapter needs back into Relay, kept
/// separate from [`crate::core::RelayCore`] to avoid a dependency cycle:
/// `core` implements this trait, `adapter` only depends on the trait.
#[async_trait]
pub trait RelayPublisher: Send + Sync {
    /// Publish inbound channel traffic onto the bus.
    async fn publish_inbound(
        &self,
        subject: &str,
        from: &str,
        payload: serde_json::Value,
    ) -> Result<String, crate::error::RelayError>;
}

/// Capability set every adapter presents.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Stable identifier, used as the [`AdapterManager`] registry key.
    fn id(&self) -> &str;

    /// Subject prefixes this adapter claims for outbound delivery.
    fn subject_prefixes(&self) -> &[String];

    /// Human-readable name, for status surfaces.
    fn display_name(&self) -> &str;

    /// Begin bridging. Idempotent: calling `start` while already connected
    /// is a no-op rather than an error from the manager's perspective, but
    /// adapters MAY reject a true double-start via
    /// [`AdapterError::AlreadyStarted`].
    async fn start(&self, publisher: Arc<dyn RelayPublisher>) -> Result<(), AdapterError>;

    /// Stop bridging, draining any in-flight outbound delivery first.
    async fn stop(&self) -> Result<(), AdapterError>;

    /// Deliver `envelope` to the remote channel addressed by `subject`.
    async fn deliver(&self, subject: &str, envelope: &Envelope) -> Result<DeliveryResult, AdapterError>;

    /// Snapshot of current runtime state.
    fn get_status(&self) -> AdapterStatusSnapshot;

    /// Non-destructive credential/reachability check.
    async fn test_connection(&self) -> Result<(), AdapterError> {
        Ok(())
    }
}

/// The subject an adapter uses for its own inbound traffic, used for the
/// echo guard below. Adapters pass this at registration.
pub struct EchoGuard {
    own_inbound_subject: String,
}

impl EchoGuard {
    /// Construct a guard for an adapter whose inbound messages always
    /// carry `own_inbound_subject` as `envelope.from`.
    pub fn new(own_inbound_subject: impl Into<String>) -> Self {
        Self {
            own_inbound_subject: own_inbound_subject.into(),
        }
    }

    /// True when `envelope_from` is this adapter's own inbound sender,
    /// meaning outbound delivery must be skipped to avoid echoing a
    /// message the adapter itself just published.
    pub fn is_echo(&self, envelope_from: &str) -> bool {
        envelope_from == self.own_inbound_subject
    }
}

/// Strict validation for externally received chat ids: integers
/// only, no leading/trailing whitespace, never empty.
pub fn validate_numeric_chat_id(raw: &str) -> Result<i64, AdapterError> {
    if raw.is_empty() {
        return Err(AdapterError::InvalidChatId("chat id is empty".to_string()));
    }
    raw.parse::<i64>()
        .map_err(|_| AdapterError::InvalidChatId(format!("chat id is not an integer: {raw}")))
}

struct AdapterRuntimeState {
    reconnect_task: Option<JoinHandle<()>>,
}

impl Default for AdapterRuntimeState {
    fn default() -> Self {
        Self {
            reconnect_task: None,
        }
    }
}

/// Owns adapter lifecycle: registration, start/stop, and routing outbound
/// deliveries to the adapter whose subject prefix matches.
///
/// Start/stop/reconnect for a single adapter id are serialized behind a
/// `tokio::sync::Mutex`; a
/// pending reconnect is a cancellable `JoinHandle` stored in that same
/// guarded state so `stop()` always observes and aborts it.
pub struct AdapterManager {
    adapters: DashMap<String, Arc<dyn Adapter>>,
    runtime: DashMap<String, Arc<Mutex<AdapterRuntimeState>>>,
}

impl Default for AdapterManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterManager {
    /// Construct an empty manager.
    pub fn new() -> Self {
        Self {
            adapters: DashMap::new(),
            runtime: DashMap::new(),
        }
    }

    /// Register an adapter. Replaces any prior registration with the same
    /// id.
    pub fn register(&self, adapter: Arc<dyn Adapter>) {
        let id = adapter.id().to_string();
        self.adapters.insert(id.clone(), adapter);
        self.runtime
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(AdapterRuntimeState::default())));
    }

    /// Start the adapter registered under `id`. On failure, schedules a
    /// bounded-backoff reconnect loop rather than propagating
    /// the error to process startup.
    #[instrument(skip(self, publisher))]
    pub async fn start(
        &self,
        id: &str,
        publisher: Arc<dyn RelayPublisher>,
    ) -> Result<(), AdapterError> {
        let adapter = self
            .adapters
            .get(id)
            .map(|e| e.clone())
            .ok_or_else(|| AdapterError::UnknownAdapter(id.to_string()))?;
        let runtime = self.runtime_state(id);
        let mut guard = runtime.lock().await;
        if let Some(handle) = guard.reconnect_task.take() {
            handle.abort();
        }
        match adapter.start(publisher.clone()).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(adapter_id = id, error = %err, "adapter start failed, scheduling reconnect");
                let adapter_for_task = adapter.clone();
                let publisher_for_task = publisher;
                let id_owned = id.to_string();
                let handle = tokio::spawn(async move {
                    for delay_ms in RECONNECT_BACKOFF_MS {
                        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                        if adapter_for_task
                            .start(publisher_for_task.clone())
                            .await
                            .is_ok()
                        {
                            return;
                        }
                    }
                    warn!(
                        adapter_id = %id_owned,
                        "max reconnection attempts exhausted"
                    );
                });
                guard.reconnect_task = Some(handle);
                Err(err)
            }
        }
    }

    /// Stop the adapter registered under `id`, aborting any pending
    /// reconnect task first.
    #[instrument(skip(self))]
    pub async fn stop(&self, id: &str) -> Result<(), AdapterError> {
        let adapter = self
            .adapters
            .get(id)
            .map(|e| e.clone())
            .ok_or_else(|| AdapterError::UnknownAdapter(id.to_string()))?;
        let runtime = self.runtime_state(id);
        let mut guard = runtime.lock().await;
        if let Some(handle) = guard.reconnect_task.take() {
            handle.abort();
        }
        adapter.stop().await
    }

    /// Deliver `envelope` to every registered adapter whose subject prefix
    /// matches `subject`, skipping adapters whose echo guard fires.
    pub async fn deliver_matching(
        &self,
        subject: &str,
        envelope: &Envelope,
    ) -> Vec<(String, Result<DeliveryResult, AdapterError>)> {
        let mut results = Vec::new();
        for entry in self.adapters.iter() {
            let adapter = entry.value().clone();
            if adapter
                .subject_prefixes()
                .iter()
                .any(|prefix| subject.starts_with(prefix.as_str()))
            {
                let outcome = adapter.deliver(subject, envelope).await;
                results.push((adapter.id().to_string(), outcome));
            }
        }
        results
    }

    /// Snapshot the status of every registered adapter.
    pub fn list_statuses(&self) -> HashMap<String, AdapterStatusSnapshot> {
        self.adapters
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().get_status()))
            .collect()
    }

    fn runtime_state(&self, id: &str) -> Arc<Mutex<AdapterRuntimeState>> {
        self.runtime
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(AdapterRuntimeState::default())))
            .clone()
    }
}
