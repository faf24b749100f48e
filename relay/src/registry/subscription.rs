//! Subscription registry: an ordered collection of pattern
//! subscriptions, persisted across restart with inert handlers.

// Layer 1: Standard library imports
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};
use ulid::Ulid;

// Layer 3: Internal module imports
use crate::envelope::Envelope;
use crate::subject::{Subject, SubjectError};

/// Failure modes for [`SubscriptionRegistry`] operations.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    /// The subscription pattern failed validation.
    #[error("invalid subscription pattern: {0}")]
    InvalidPattern(#[from] SubjectError),
}

/// A boxed message handler. Cloneable via `Arc` so a cancellation handle can
/// be shared without re-registering. Receives the concrete subject, the
/// payload, and the full envelope (for reply-to/budget/sender access).
pub type Handler = Arc<dyn Fn(&str, &serde_json::Value, &Envelope) + Send + Sync>;

/// Snapshot of a single subscription, as returned by
/// [`SubscriptionRegistry::list_subscriptions`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInfo {
    /// Unique subscription id.
    pub id: String,
    /// The pattern subscribed to.
    pub pattern: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Serialize, Deserialize)]
struct PersistedEntry {
    id: String,
    pattern: String,
    created_at: DateTime<Utc>,
}

struct Subscription {
    id: String,
    pattern: Subject,
    created_at: DateTime<Utc>,
    handler: Handler,
    /// Set when this entry was restored from disk and never re-subscribed.
    inert: bool,
}

fn inert_handler() -> Handler {
    Arc::new(|_subject: &str, _payload: &serde_json::Value, _envelope: &Envelope| {})
}

/// A no-op cancellation handle: calling `cancel` more than once, or after the
/// subscription was already removed, is a no-op.
#[derive(Clone)]
pub struct CancellationHandle {
    id: String,
    registry: SubscriptionRegistry,
}

impl CancellationHandle {
    /// Remove this subscription, if it still exists.
    pub fn cancel(&self) {
        self.registry.remove(&self.id);
    }
}

/// Ordered collection of `{ id, pattern, createdAt, handler }` entries.
#[derive(Clone)]
pub struct SubscriptionRegistry {
    inner: Arc<RwLock<Vec<Subscription>>>,
    persist_path: Option<PathBuf>,
    /// Incremented whenever a dispatch matches a restored inert handler
    /// (i.e. the owning subsystem never re-subscribed after restart).
    inert_dispatch_count: Arc<AtomicU64>,
}

impl SubscriptionRegistry {
    /// Construct a registry with no on-disk persistence (signals, tests).
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            persist_path: None,
            inert_dispatch_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Construct a registry that persists `(id, pattern, createdAt)` to
    /// `path` on every mutation, restoring inert entries from it on
    /// construction. Corrupt/missing/invalid files degrade silently to "no
    /// subscriptions".
    pub fn restore_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let restored = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Vec<PersistedEntry>>(&raw).ok())
            .unwrap_or_default();

        let subscriptions = restored
            .into_iter()
            .filter_map(|entry| {
                Subject::pattern(entry.pattern).ok().map(|pattern| Subscription {
                    id: entry.id,
                    pattern,
                    created_at: entry.created_at,
                    handler: inert_handler(),
                    inert: true,
                })
            })
            .collect();

        Self {
            inner: Arc::new(RwLock::new(subscriptions)),
            persist_path: Some(path),
            inert_dispatch_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe `handler` to `pattern`. Returns an idempotent cancellation
    /// handle.
    #[instrument(skip(self, handler))]
    pub fn subscribe(
        &self,
        pattern: &str,
        handler: Handler,
    ) -> Result<CancellationHandle, SubscriptionError> {
        let pattern = Subject::pattern(pattern)?;
        let id = Ulid::new().to_string();
        self.inner.write().push(Subscription {
            id: id.clone(),
            pattern,
            created_at: Utc::now(),
            handler,
            inert: false,
        });
        self.persist();
        Ok(CancellationHandle {
            id,
            registry: self.clone(),
        })
    }

    fn remove(&self, id: &str) {
        let mut guard = self.inner.write();
        let before = guard.len();
        guard.retain(|s| s.id != id);
        if guard.len() != before {
            drop(guard);
            self.persist();
        }
    }

    /// Handlers whose pattern matches `concrete_subject`, in subscription
    /// insertion order. Dispatch to a restored inert handler increments
    /// [`Self::inert_dispatch_count`].
    pub fn get_subscribers(&self, concrete_subject: &Subject) -> Vec<Handler> {
        self.inner
            .read()
            .iter()
            .filter(|s| s.pattern.matches(concrete_subject))
            .map(|s| {
                if s.inert {
                    self.inert_dispatch_count.fetch_add(1, Ordering::Relaxed);
                }
                s.handler.clone()
            })
            .collect()
    }

    /// Current count of dispatches that hit an inert (restored, never
    /// re-subscribed) handler.
    pub fn inert_dispatch_count(&self) -> u64 {
        self.inert_dispatch_count.load(Ordering::Relaxed)
    }

    /// Snapshot of `{ id, pattern, createdAt }` for all subscriptions.
    pub fn list_subscriptions(&self) -> Vec<SubscriptionInfo> {
        self.inner
            .read()
            .iter()
            .map(|s| SubscriptionInfo {
                id: s.id.clone(),
                pattern: s.pattern.as_str().to_string(),
                created_at: s.created_at,
            })
            .collect()
    }

    /// Clear all subscriptions; handles previously returned become no-ops.
    pub fn remove_all_subscriptions(&self) {
        self.inner.write().clear();
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = &self.persist_path else {
            return;
        };
        let entries: Vec<PersistedEntry> = self
            .inner
            .read()
            .iter()
            .map(|s| PersistedEntry {
                id: s.id.clone(),
                pattern: s.pattern.as_str().to_string(),
                created_at: s.created_at,
            })
            .collect();
        if let Err(err) = write_atomic(path, &entries) {
            warn!(error = %err, "failed to persist subscription registry");
        }
    }
}

fn write_atomic(path: &Path, entries: &[PersistedEntry]) -> std::io::Result<()> {
    let json = serde_json::to_vec_pretty(entries)?;
    let tmp = path.with_extension("tmp");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn subj(s: &str) -> Subject {
        Subject::concrete(s).unwrap()
    }

    fn sample_envelope() -> Envelope {
        let subject = subj("relay.agent.sess1");
        let from = subj("relay.human.console.c1");
        let budget = crate::envelope::Budget::default_at(Utc::now());
        Envelope::new(&subject, &from, None, budget, serde_json::Value::Null)
    }

    #[test]
    fn test_subscribe_and_get_subscribers_matches_pattern() {
        let registry = SubscriptionRegistry::in_memory();
        registry.subscribe("relay.agent.*", inert_handler()).unwrap();
        assert_eq!(registry.get_subscribers(&subj("relay.agent.sess1")).len(), 1);
        assert_eq!(registry.get_subscribers(&subj("relay.system.pulse.a")).len(), 0);
    }

    #[test]
    fn test_subscribers_returned_in_insertion_order() {
        let registry = SubscriptionRegistry::in_memory();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        for i in 0..3 {
            let order = order.clone();
            registry
                .subscribe(
                    "relay.agent.*",
                    Arc::new(move |_s: &str, _p: &serde_json::Value, _e: &Envelope| {
                        order.lock().push(i)
                    }),
                )
                .unwrap();
        }
        let sample = sample_envelope();
        for handler in registry.get_subscribers(&subj("relay.agent.sess1")) {
            handler("relay.agent.sess1", &serde_json::Value::Null, &sample);
        }
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cancellation_handle_removes_subscription() {
        let registry = SubscriptionRegistry::in_memory();
        let handle = registry.subscribe("relay.agent.*", inert_handler()).unwrap();
        handle.cancel();
        assert_eq!(registry.get_subscribers(&subj("relay.agent.sess1")).len(), 0);
    }

    #[test]
    fn test_cancellation_handle_is_idempotent() {
        let registry = SubscriptionRegistry::in_memory();
        let handle = registry.subscribe("relay.agent.*", inert_handler()).unwrap();
        handle.cancel();
        handle.cancel();
        assert_eq!(registry.list_subscriptions().len(), 0);
    }

    #[test]
    fn test_remove_all_subscriptions_clears_and_orphans_handles() {
        let registry = SubscriptionRegistry::in_memory();
        let handle = registry.subscribe("relay.agent.*", inert_handler()).unwrap();
        registry.remove_all_subscriptions();
        assert_eq!(registry.list_subscriptions().len(), 0);
        handle.cancel();
    }

    #[test]
    fn test_persistence_round_trip_restores_inert_handlers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscriptions.json");
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let registry = SubscriptionRegistry::restore_from(&path);
            let fired = fired.clone();
            registry
                .subscribe(
                    "relay.agent.*",
                    Arc::new(move |_s: &str, _p: &serde_json::Value, _e: &Envelope| {
                        fired.fetch_add(1, Ordering::Relaxed);
                    }),
                )
                .unwrap();
        }
        let restored = SubscriptionRegistry::restore_from(&path);
        assert_eq!(restored.list_subscriptions().len(), 1);
        let subscribers = restored.get_subscribers(&subj("relay.agent.sess1"));
        assert_eq!(subscribers.len(), 1);
        subscribers[0]("relay.agent.sess1", &serde_json::Value::Null, &sample_envelope());
        // the restored handler is inert: the original closure never fires
        assert_eq!(fired.load(Ordering::Relaxed), 0);
        assert_eq!(restored.inert_dispatch_count(), 1);
    }

    #[test]
    fn test_restore_from_missing_file_degrades_to_no_subscriptions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");
        let registry = SubscriptionRegistry::restore_from(&path);
        assert_eq!(registry.list_subscriptions().len(), 0);
    }

    #[test]
    fn test_restore_from_corrupt_file_degrades_to_no_subscriptions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscriptions.json");
        std::fs::write(&path, b"not json").unwrap();
        let registry = SubscriptionRegistry::restore_from(&path);
        assert_eq!(registry.list_subscriptions().len(), 0);
    }

    #[test]
    fn test_subscribe_rejects_invalid_pattern() {
        let registry = SubscriptionRegistry::in_memory();
        let err = registry.subscribe("relay..bad", inert_handler()).unwrap_err();
        assert!(matches!(err, SubscriptionError::InvalidPattern(_)));
    }
}
