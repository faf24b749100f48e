//! Endpoint registry: the in-memory map of registered mailboxes,
//! kept consistent with the on-disk `mailboxes/<hash>/` tree.

// Layer 1: Standard library imports
use std::path::{Path, PathBuf};

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};

// Layer 3: Internal module imports
use crate::maildir::MaildirStore;
use crate::subject::{Subject, SubjectError};

/// Failure modes for [`EndpointRegistry`] operations.
#[derive(Debug, Error)]
pub enum EndpointRegistryError {
    /// Invalid or wildcard-bearing subject.
    #[error("invalid endpoint subject: {0}")]
    InvalidSubject(#[from] SubjectError),

    /// An endpoint already exists for this subject.
    #[error("endpoint already registered: {0}")]
    AlreadyRegistered(String),

    /// The underlying maildir could not be created/removed.
    #[error("maildir error: {0}")]
    Maildir(#[from] crate::maildir::MaildirError),
}

/// A registered, concrete-subject-addressed mailbox.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Immutable target subject.
    pub subject: String,
    /// 12-char lowercase hex digest, used as the maildir directory name.
    pub hash: String,
    /// Absolute path to the maildir root for this endpoint.
    pub maildir_path: String,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

/// Deterministic, collision-resistant `subject -> hash` mapping: stable
/// across processes because it only depends on the subject bytes.
pub fn endpoint_hash(subject: &Subject) -> String {
    let digest = blake3::hash(subject.as_str().as_bytes());
    digest.to_hex()[..12].to_string()
}

#[derive(Clone, Serialize, Deserialize)]
struct PersistedEndpoint {
    subject: String,
    hash: String,
    registered_at: DateTime<Utc>,
}

/// In-memory `subject -> Endpoint` map, backed by a [`MaildirStore`]. The
/// hash is a one-way digest of the subject, so restoring this map across a
/// restart requires its own sidecar file rather than a directory scan of
/// `mailboxes/`.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    maildir: MaildirStore,
    by_subject: std::sync::Arc<DashMap<String, Endpoint>>,
    by_hash: std::sync::Arc<DashMap<String, String>>,
    persist_path: Option<PathBuf>,
}

impl EndpointRegistry {
    /// Construct an empty, non-persisting registry rooted at `maildir`'s
    /// directory (tests).
    pub fn new(maildir: MaildirStore) -> Self {
        Self {
            maildir,
            by_subject: std::sync::Arc::new(DashMap::new()),
            by_hash: std::sync::Arc::new(DashMap::new()),
            persist_path: None,
        }
    }

    /// Restore registrations from `path`, if present, and persist every
    /// subsequent mutation back to it. A missing or corrupt file degrades
    /// to an empty registry, mirroring
    /// [`crate::registry::subscription::SubscriptionRegistry::restore_from`].
    pub fn restore_from(maildir: MaildirStore, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let restored: Vec<PersistedEndpoint> = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        let by_subject = DashMap::new();
        let by_hash = DashMap::new();
        for entry in restored {
            by_hash.insert(entry.hash.clone(), entry.subject.clone());
            by_subject.insert(
                entry.subject.clone(),
                Endpoint {
                    subject: entry.subject,
                    hash: entry.hash.clone(),
                    maildir_path: maildir.root().join(&entry.hash).to_string_lossy().to_string(),
                    registered_at: entry.registered_at,
                },
            );
        }

        Self {
            maildir,
            by_subject: std::sync::Arc::new(by_subject),
            by_hash: std::sync::Arc::new(by_hash),
            persist_path: Some(path),
        }
    }

    /// Register a concrete-subject mailbox. Rejects empty/wildcard subjects
    /// and duplicate registration; idempotently creates the maildir
    /// directory tree.
    #[instrument(skip(self))]
    pub fn register_endpoint(&self, subject: &str) -> Result<Endpoint, EndpointRegistryError> {
        let subject = Subject::concrete(subject)?;
        if self.by_subject.contains_key(subject.as_str()) {
            return Err(EndpointRegistryError::AlreadyRegistered(
                subject.as_str().to_string(),
            ));
        }
        let hash = endpoint_hash(&subject);
        self.maildir.ensure_maildir(&hash)?;
        let endpoint = Endpoint {
            subject: subject.as_str().to_string(),
            hash: hash.clone(),
            maildir_path: self.maildir.root().join(&hash).to_string_lossy().to_string(),
            registered_at: Utc::now(),
        };
        self.by_subject
            .insert(subject.as_str().to_string(), endpoint.clone());
        self.by_hash.insert(hash, subject.as_str().to_string());
        self.persist();
        Ok(endpoint)
    }

    /// Remove the mapping and recursively delete the mailbox directory tree.
    /// Returns `false` (not an error) when nothing was registered.
    #[instrument(skip(self))]
    pub fn unregister_endpoint(&self, subject: &str) -> Result<bool, EndpointRegistryError> {
        let Some((_, endpoint)) = self.by_subject.remove(subject) else {
            return Ok(false);
        };
        self.by_hash.remove(&endpoint.hash);
        self.maildir.delete_maildir(&endpoint.hash)?;
        self.persist();
        Ok(true)
    }

    /// Look up by subject.
    pub fn get_endpoint(&self, subject: &str) -> Option<Endpoint> {
        self.by_subject.get(subject).map(|e| e.clone())
    }

    /// Look up by hash.
    pub fn get_endpoint_by_hash(&self, hash: &str) -> Option<Endpoint> {
        let subject = self.by_hash.get(hash)?;
        self.get_endpoint(subject.value())
    }

    /// Snapshot of all registered endpoints.
    pub fn list_endpoints(&self) -> Vec<Endpoint> {
        self.by_subject.iter().map(|e| e.value().clone()).collect()
    }

    /// Whether `subject` is currently registered.
    pub fn has_endpoint(&self, subject: &str) -> bool {
        self.by_subject.contains_key(subject)
    }

    /// Number of registered endpoints.
    pub fn size(&self) -> usize {
        self.by_subject.len()
    }

    fn persist(&self) {
        let Some(path) = &self.persist_path else {
            return;
        };
        let entries: Vec<PersistedEndpoint> = self
            .by_subject
            .iter()
            .map(|e| PersistedEndpoint {
                subject: e.subject.clone(),
                hash: e.hash.clone(),
                registered_at: e.registered_at,
            })
            .collect();
        if let Err(err) = write_atomic(path, &entries) {
            warn!(error = %err, "failed to persist endpoint registry");
        }
    }
}

fn write_atomic(path: &Path, entries: &[PersistedEndpoint]) -> std::io::Result<()> {
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

    fn registry(dir: &tempfile::TempDir) -> EndpointRegistry {
        EndpointRegistry::new(MaildirStore::new(dir.path()))
    }

    #[test]
    fn test_register_creates_endpoint_with_stable_hash() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(&dir);
        let e1 = reg.register_endpoint("relay.agent.sess1").unwrap();
        let e2_hash = endpoint_hash(&Subject::concrete("relay.agent.sess1").unwrap());
        assert_eq!(e1.hash, e2_hash);
    }

    #[test]
    fn test_register_duplicate_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(&dir);
        reg.register_endpoint("relay.agent.sess1").unwrap();
        let err = reg.register_endpoint("relay.agent.sess1").unwrap_err();
        assert!(matches!(err, EndpointRegistryError::AlreadyRegistered(_)));
    }

    #[test]
    fn test_register_rejects_wildcard_subject() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(&dir);
        let err = reg.register_endpoint("relay.agent.*").unwrap_err();
        assert!(matches!(err, EndpointRegistryError::InvalidSubject(_)));
    }

    #[test]
    fn test_unregister_missing_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(&dir);
        assert!(!reg.unregister_endpoint("relay.agent.nope").unwrap());
    }

    #[test]
    fn test_register_then_unregister_clears_has_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(&dir);
        reg.register_endpoint("relay.agent.sess1").unwrap();
        assert!(reg.has_endpoint("relay.agent.sess1"));
        assert!(reg.unregister_endpoint("relay.agent.sess1").unwrap());
        assert!(!reg.has_endpoint("relay.agent.sess1"));
        assert_eq!(reg.size(), 0);
    }

    #[test]
    fn test_get_endpoint_by_hash_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(&dir);
        let endpoint = reg.register_endpoint("relay.agent.sess1").unwrap();
        let by_hash = reg.get_endpoint_by_hash(&endpoint.hash).unwrap();
        assert_eq!(by_hash.subject, "relay.agent.sess1");
    }

    #[test]
    fn test_list_endpoints_reflects_registrations() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry(&dir);
        reg.register_endpoint("relay.agent.a").unwrap();
        reg.register_endpoint("relay.agent.b").unwrap();
        assert_eq!(reg.list_endpoints().len(), 2);
    }

    #[test]
    fn test_restore_from_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("endpoints.json");
        {
            let reg = EndpointRegistry::restore_from(MaildirStore::new(dir.path()), &sidecar);
            reg.register_endpoint("relay.agent.sess1").unwrap();
        }
        let restored = EndpointRegistry::restore_from(MaildirStore::new(dir.path()), &sidecar);
        assert!(restored.has_endpoint("relay.agent.sess1"));
        assert_eq!(restored.size(), 1);
    }

    #[test]
    fn test_restore_from_missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("does-not-exist.json");
        let reg = EndpointRegistry::restore_from(MaildirStore::new(dir.path()), &sidecar);
        assert_eq!(reg.size(), 0);
    }

    #[test]
    fn test_unregister_persists_removal() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("endpoints.json");
        let reg = EndpointRegistry::restore_from(MaildirStore::new(dir.path()), &sidecar);
        reg.register_endpoint("relay.agent.sess1").unwrap();
        reg.unregister_endpoint("relay.agent.sess1").unwrap();
        let reloaded = EndpointRegistry::restore_from(MaildirStore::new(dir.path()), &sidecar);
        assert_eq!(reloaded.size(), 0);
    }
}
