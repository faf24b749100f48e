//! Durable, crash-consistent per-endpoint mailbox with atomic state
//! transitions.
//!
//! Directory layout per endpoint hash: `tmp/`, `new/`, `cur/`, `failed/`,
//! each mode `0o700`; message files mode `0o600`. The `tmp -> new` staging
//! rename guarantees partial writes are never visible, and `rename` within
//! one filesystem is atomic, so concurrent `claim` races resolve as "exactly
//! one wins".

mod error;

pub use error::MaildirError;

// Layer 1: Standard library imports
use std::path::{Path, PathBuf};

// Layer 2: Third-party crate imports
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use ulid::Ulid;

// Layer 3: Internal module imports
use crate::envelope::Envelope;

/// The three non-terminal-failure mailbox subdirectories a message can live
/// in, plus `Failed` as the terminal failure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailboxBox {
    /// Staged but not yet visible (internal only; never returned by list*).
    Tmp,
    /// Delivered, awaiting claim.
    New,
    /// Claimed by a subscriber, awaiting completion.
    Cur,
    /// Terminal failure with a dead-letter sidecar.
    Failed,
}

impl MailboxBox {
    fn dirname(self) -> &'static str {
        match self {
            Self::Tmp => "tmp",
            Self::New => "new",
            Self::Cur => "cur",
            Self::Failed => "failed",
        }
    }
}

/// Dead letter sidecar written alongside a failed message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadLetter {
    /// The envelope that could not be delivered.
    pub envelope: Envelope,
    /// Human-readable failure reason.
    pub reason: String,
    /// ISO-8601 failure timestamp.
    pub failed_at: chrono::DateTime<Utc>,
    /// Endpoint hash the delivery was attempted against.
    pub endpoint_hash: String,
}

/// Durable per-endpoint mailbox store rooted at `<dataDir>/mailboxes/`.
#[derive(Debug, Clone)]
pub struct MaildirStore {
    root: PathBuf,
}

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

impl MaildirStore {
    /// Root directory all endpoint mailboxes are created under
    /// (`<dataDir>/mailboxes/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn mailbox_dir(&self, hash: &str) -> PathBuf {
        self.root.join(hash)
    }

    fn box_dir(&self, hash: &str, b: MailboxBox) -> PathBuf {
        self.mailbox_dir(hash).join(b.dirname())
    }

    /// Idempotent creation of the four subdirectories at mode `0o700`.
    #[instrument(skip(self), fields(endpoint_hash = %hash))]
    pub fn ensure_maildir(&self, hash: &str) -> Result<(), MaildirError> {
        for b in [
            MailboxBox::Tmp,
            MailboxBox::New,
            MailboxBox::Cur,
            MailboxBox::Failed,
        ] {
            let dir = self.box_dir(hash, b);
            std::fs::create_dir_all(&dir)
                .map_err(|e| MaildirError::Io(dir.display().to_string(), e.to_string()))?;
            set_dir_mode(&dir)?;
        }
        debug!("maildir ensured");
        Ok(())
    }

    /// Recursively delete the mailbox directory tree for `hash`.
    pub fn delete_maildir(&self, hash: &str) -> Result<(), MaildirError> {
        let dir = self.mailbox_dir(hash);
        if dir.exists() {
            std::fs::remove_dir_all(&dir)
                .map_err(|e| MaildirError::Io(dir.display().to_string(), e.to_string()))?;
        }
        Ok(())
    }

    /// Write to `tmp/<id>.json`, fsync, rename to `new/<id>.json`. Returns
    /// the freshly generated filename id (distinct from `envelope.id`).
    #[instrument(skip(self, envelope), fields(endpoint_hash = %hash, message_id = %envelope.id))]
    pub fn deliver(&self, hash: &str, envelope: &Envelope) -> Result<String, MaildirError> {
        let filename_id = Ulid::new().to_string();
        let tmp_path = self.box_dir(hash, MailboxBox::Tmp).join(format!("{filename_id}.json"));
        let new_path = self.box_dir(hash, MailboxBox::New).join(format!("{filename_id}.json"));
        write_json_atomic(&tmp_path, envelope)?;
        fsync_file(&tmp_path)?;
        std::fs::rename(&tmp_path, &new_path)
            .map_err(|e| MaildirError::Io(new_path.display().to_string(), e.to_string()))?;
        debug!(filename_id = %filename_id, "delivered");
        Ok(filename_id)
    }

    /// Rename `new/<id>.json` -> `cur/<id>.json` and parse it. Atomic: at
    /// most one concurrent claim of the same id succeeds.
    pub fn claim(&self, hash: &str, id: &str) -> Result<Envelope, MaildirError> {
        let from = self.box_dir(hash, MailboxBox::New).join(format!("{id}.json"));
        let to = self.box_dir(hash, MailboxBox::Cur).join(format!("{id}.json"));
        std::fs::rename(&from, &to)
            .map_err(|_| MaildirError::ClaimFailed(id.to_string()))?;
        read_json(&to)
    }

    /// Delete `cur/<id>.json`. The message must have been claimed.
    pub fn complete(&self, hash: &str, id: &str) -> Result<(), MaildirError> {
        let path = self.box_dir(hash, MailboxBox::Cur).join(format!("{id}.json"));
        std::fs::remove_file(&path).map_err(|_| MaildirError::NotClaimed(id.to_string()))
    }

    /// Rename `cur/<id>.json` -> `failed/<id>.json` and write the
    /// `.reason.json` sidecar.
    #[instrument(skip(self), fields(endpoint_hash = %hash, message_id = %id))]
    pub fn fail(&self, hash: &str, id: &str, reason: &str) -> Result<(), MaildirError> {
        let from = self.box_dir(hash, MailboxBox::Cur).join(format!("{id}.json"));
        let to = self.box_dir(hash, MailboxBox::Failed).join(format!("{id}.json"));
        std::fs::rename(&from, &to).map_err(|_| MaildirError::NotClaimed(id.to_string()))?;
        let envelope: Envelope = read_json(&to)?;
        let sidecar = DeadLetter {
            envelope,
            reason: reason.to_string(),
            failed_at: Utc::now(),
            endpoint_hash: hash.to_string(),
        };
        let sidecar_path = self
            .box_dir(hash, MailboxBox::Failed)
            .join(format!("{id}.reason.json"));
        write_json_atomic(&sidecar_path, &sidecar)?;
        warn!(reason = %reason, "message moved to failed");
        Ok(())
    }

    /// Write the envelope directly to `failed/<envelope.id>.json` plus
    /// sidecar, bypassing `tmp`/`new`/`cur` (used to reject a publish that
    /// never had a claim).
    #[instrument(skip(self, envelope), fields(endpoint_hash = %hash, message_id = %envelope.id))]
    pub fn fail_direct(
        &self,
        hash: &str,
        envelope: &Envelope,
        reason: &str,
    ) -> Result<(), MaildirError> {
        let path = self
            .box_dir(hash, MailboxBox::Failed)
            .join(format!("{}.json", envelope.id));
        write_json_atomic(&path, envelope)?;
        let sidecar = DeadLetter {
            envelope: envelope.clone(),
            reason: reason.to_string(),
            failed_at: Utc::now(),
            endpoint_hash: hash.to_string(),
        };
        let sidecar_path = self
            .box_dir(hash, MailboxBox::Failed)
            .join(format!("{}.reason.json", envelope.id));
        write_json_atomic(&sidecar_path, &sidecar)?;
        Ok(())
    }

    /// List ids (filename stems, excluding `.reason.json` sidecars) in
    /// `new/`, lexicographically sorted (FIFO for ULID filenames).
    pub fn list_new(&self, hash: &str) -> Result<Vec<String>, MaildirError> {
        self.list_box(hash, MailboxBox::New)
    }

    /// List ids in `cur/`.
    pub fn list_current(&self, hash: &str) -> Result<Vec<String>, MaildirError> {
        self.list_box(hash, MailboxBox::Cur)
    }

    /// List ids in `failed/`.
    pub fn list_failed(&self, hash: &str) -> Result<Vec<String>, MaildirError> {
        self.list_box(hash, MailboxBox::Failed)
    }

    fn list_box(&self, hash: &str, b: MailboxBox) -> Result<Vec<String>, MaildirError> {
        let dir = self.box_dir(hash, b);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids: Vec<String> = std::fs::read_dir(&dir)
            .map_err(|e| MaildirError::Io(dir.display().to_string(), e.to_string()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let stem = name.strip_suffix(".json")?;
                if stem.ends_with(".reason") {
                    None
                } else {
                    Some(stem.to_string())
                }
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Read and parse the envelope for `id` in the given box, or `None` if
    /// absent.
    pub fn read_envelope(
        &self,
        hash: &str,
        b: MailboxBox,
        id: &str,
    ) -> Result<Option<Envelope>, MaildirError> {
        let path = self.box_dir(hash, b).join(format!("{id}.json"));
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(read_json(&path)?))
    }

    /// Read and parse the dead-letter sidecar for `id`, or `None` if absent.
    pub fn read_dead_letter(&self, hash: &str, id: &str) -> Result<Option<DeadLetter>, MaildirError> {
        let path = self
            .box_dir(hash, MailboxBox::Failed)
            .join(format!("{id}.reason.json"));
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(read_json(&path)?))
    }

    /// True if `tmp/` for this endpoint is empty (used in tests to assert
    /// that nothing is ever left staged after a crash-consistent rename).
    pub fn tmp_is_empty(&self, hash: &str) -> Result<bool, MaildirError> {
        Ok(self.list_box(hash, MailboxBox::Tmp)?.is_empty())
    }

    /// Root mailboxes directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), MaildirError> {
    let json = serde_json::to_vec_pretty(value)
        .map_err(|e| MaildirError::Serialization(e.to_string()))?;
    std::fs::write(path, &json).map_err(|e| MaildirError::Io(path.display().to_string(), e.to_string()))?;
    set_file_mode(path)?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, MaildirError> {
    let data = std::fs::read(path).map_err(|e| MaildirError::Io(path.display().to_string(), e.to_string()))?;
    serde_json::from_slice(&data).map_err(|e| MaildirError::Serialization(e.to_string()))
}

/// Force the `tmp/<id>.json` write to stable storage before the rename that
/// makes it visible in `new/`, so a crash between write and rename never
/// leaves a zero-length or partially-flushed file for a consumer to race.
fn fsync_file(path: &Path) -> Result<(), MaildirError> {
    std::fs::File::open(path)
        .and_then(|f| f.sync_all())
        .map_err(|e| MaildirError::Io(path.display().to_string(), e.to_string()))
}

#[cfg(unix)]
fn set_dir_mode(path: &Path) -> Result<(), MaildirError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(DIR_MODE))
        .map_err(|e| MaildirError::Io(path.display().to_string(), e.to_string()))
}

#[cfg(not(unix))]
fn set_dir_mode(_path: &Path) -> Result<(), MaildirError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_mode(path: &Path) -> Result<(), MaildirError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(FILE_MODE))
        .map_err(|e| MaildirError::Io(path.display().to_string(), e.to_string()))
}

#[cfg(not(unix))]
fn set_file_mode(_path: &Path) -> Result<(), MaildirError> {
    Ok(())
}
