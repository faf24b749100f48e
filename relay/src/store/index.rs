//! Secondary SQLite index of messages: authoritative for queries,
//! not for existence — rebuildable from the maildir at any time.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::path::Path;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, instrument};

// Layer 3: Internal module imports
use crate::maildir::{MailboxBox, MaildirStore};

/// Failure modes for [`Index`] operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Underlying `sqlx`/SQLite failure.
    #[error("index database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A maildir operation failed while rebuilding the index.
    #[error("index rebuild maildir error: {0}")]
    Rebuild(String),
}

/// `messages.status`: which maildir box the message currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Delivered, awaiting claim.
    New,
    /// Claimed, awaiting completion.
    Cur,
    /// Terminal failure.
    Failed,
}

impl MessageStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Cur => "cur",
            Self::Failed => "failed",
        }
    }

    fn from_str(s: &str) -> Self {
        match s {
            "cur" => Self::Cur,
            "failed" => Self::Failed,
            _ => Self::New,
        }
    }
}

impl From<MailboxBox> for MessageStatus {
    fn from(b: MailboxBox) -> Self {
        match b {
            MailboxBox::New => Self::New,
            MailboxBox::Cur => Self::Cur,
            MailboxBox::Failed | MailboxBox::Tmp => Self::Failed,
        }
    }
}

/// A row in the secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedMessage {
    /// Filename id (not the envelope's own `id` — see [`Index::rebuild`]).
    pub id: String,
    /// Target subject.
    pub subject: String,
    /// Sender subject.
    pub sender: String,
    /// Endpoint hash.
    pub endpoint_hash: String,
    /// Current maildir box.
    pub status: MessageStatus,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// Epoch-millisecond TTL.
    pub ttl: i64,
}

/// Aggregate counts returned by [`Index::get_metrics`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexMetrics {
    /// Total row count.
    pub total_messages: i64,
    /// Count grouped by status.
    pub by_status: HashMap<String, i64>,
    /// `(subject, count)` pairs, sorted by count descending.
    pub by_subject: Vec<(String, i64)>,
}

/// Secondary SQLite index, opened in WAL mode.
#[derive(Debug, Clone)]
pub struct Index {
    pool: SqlitePool,
}

impl Index {
    /// Open (creating if absent) the index database at `path`, running
    /// forward-only migrations gated on `PRAGMA user_version`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn open(path: &Path) -> Result<Self, IndexError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory index, for tests.
    pub async fn open_in_memory() -> Result<Self, IndexError> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Memory);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), IndexError> {
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(pool)
            .await?;
        if version < 1 {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS messages (
                    id TEXT PRIMARY KEY,
                    subject TEXT NOT NULL,
                    sender TEXT NOT NULL,
                    endpoint_hash TEXT NOT NULL,
                    status TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    ttl INTEGER NOT NULL
                )
                "#,
            )
            .execute(pool)
            .await?;
            sqlx::query(
                "CREATE INDEX IF NOT EXISTS idx_messages_sender_created ON messages(sender, created_at)",
            )
            .execute(pool)
            .await?;
            sqlx::query(
                "CREATE INDEX IF NOT EXISTS idx_messages_endpoint_hash ON messages(endpoint_hash)",
            )
            .execute(pool)
            .await?;
            sqlx::query("PRAGMA user_version = 1").execute(pool).await?;
            debug!("index schema migrated to v1");
        }
        Ok(())
    }

    /// `INSERT OR REPLACE` — idempotent.
    pub async fn insert_message(&self, msg: &IndexedMessage) -> Result<(), IndexError> {
        sqlx::query(
            "INSERT OR REPLACE INTO messages (id, subject, sender, endpoint_hash, status, created_at, ttl) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&msg.id)
        .bind(&msg.subject)
        .bind(&msg.sender)
        .bind(&msg.endpoint_hash)
        .bind(msg.status.as_str())
        .bind(&msg.created_at)
        .bind(msg.ttl)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Update the `status` column for `id`.
    pub async fn update_status(&self, id: &str, status: MessageStatus) -> Result<(), IndexError> {
        sqlx::query("UPDATE messages SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete the row for `id` (used when a message completes successfully).
    pub async fn delete_message(&self, id: &str) -> Result<(), IndexError> {
        sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Fetch a single row by id.
    pub async fn get_message(&self, id: &str) -> Result<Option<IndexedMessage>, IndexError> {
        let row = sqlx::query("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(row_to_message))
    }

    /// Fetch rows for `subject`, newest first.
    pub async fn get_by_subject(&self, subject: &str) -> Result<Vec<IndexedMessage>, IndexError> {
        let rows = sqlx::query("SELECT * FROM messages WHERE subject = ? ORDER BY created_at DESC")
            .bind(subject)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_message).collect())
    }

    /// Fetch rows for `endpoint_hash`.
    pub async fn get_by_endpoint(&self, hash: &str) -> Result<Vec<IndexedMessage>, IndexError> {
        let rows = sqlx::query("SELECT * FROM messages WHERE endpoint_hash = ?")
            .bind(hash)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_message).collect())
    }

    /// Count of messages from `sender` with `created_at >= window_start_iso`.
    pub async fn count_sender_in_window(
        &self,
        sender: &str,
        window_start_iso: &str,
    ) -> Result<i64, IndexError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE sender = ? AND created_at >= ?",
        )
        .bind(sender)
        .bind(window_start_iso)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count of `status='new'` messages for `hash`.
    pub async fn count_new_by_endpoint(&self, hash: &str) -> Result<i64, IndexError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE endpoint_hash = ? AND status = 'new'",
        )
        .bind(hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Delete rows whose `ttl` has passed `now_ms` (defaults to the current
    /// wall clock). Returns the number of rows removed.
    pub async fn delete_expired(&self, now_ms: Option<i64>) -> Result<u64, IndexError> {
        let now_ms = now_ms.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
        let result = sqlx::query("DELETE FROM messages WHERE ttl < ?")
            .bind(now_ms)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// `{ totalMessages, byStatus, bySubject[] sorted desc }`.
    pub async fn get_metrics(&self) -> Result<IndexMetrics, IndexError> {
        let total_messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;

        let status_rows = sqlx::query("SELECT status, COUNT(*) as c FROM messages GROUP BY status")
            .fetch_all(&self.pool)
            .await?;
        let mut by_status = HashMap::new();
        for row in status_rows {
            let status: String = row.try_get("status")?;
            let count: i64 = row.try_get("c")?;
            by_status.insert(status, count);
        }

        let subject_rows = sqlx::query(
            "SELECT subject, COUNT(*) as c FROM messages GROUP BY subject ORDER BY c DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut by_subject = Vec::new();
        for row in subject_rows {
            let subject: String = row.try_get("subject")?;
            let count: i64 = row.try_get("c")?;
            by_subject.push((subject, count));
        }

        Ok(IndexMetrics {
            total_messages,
            by_status,
            by_subject,
        })
    }

    /// Truncate the table and repopulate it by scanning each endpoint's
    /// `new/`, `cur/`, `failed/` directories, using the filename id as
    /// `messages.id`. Idempotent: `rebuild; rebuild` yields the same row
    /// set as a single `rebuild`.
    #[instrument(skip_all)]
    pub async fn rebuild(
        &self,
        maildir: &MaildirStore,
        endpoint_hash_to_subject: &HashMap<String, String>,
    ) -> Result<usize, IndexError> {
        sqlx::query("DELETE FROM messages").execute(&self.pool).await?;

        let mut indexed = 0usize;
        for (hash, subject) in endpoint_hash_to_subject {
            for (b, status) in [
                (MailboxBox::New, MessageStatus::New),
                (MailboxBox::Cur, MessageStatus::Cur),
                (MailboxBox::Failed, MessageStatus::Failed),
            ] {
                let ids = match b {
                    MailboxBox::New => maildir.list_new(hash),
                    MailboxBox::Cur => maildir.list_current(hash),
                    MailboxBox::Failed => maildir.list_failed(hash),
                    MailboxBox::Tmp => Ok(Vec::new()),
                }
                .map_err(|e| IndexError::Rebuild(e.to_string()))?;

                for id in ids {
                    let envelope = maildir
                        .read_envelope(hash, b, &id)
                        .map_err(|e| IndexError::Rebuild(e.to_string()))?;
                    let Some(envelope) = envelope else { continue };
                    self.insert_message(&IndexedMessage {
                        id,
                        subject: subject.clone(),
                        sender: envelope.from,
                        endpoint_hash: hash.clone(),
                        status,
                        created_at: envelope.created_at.to_rfc3339(),
                        ttl: envelope.budget.ttl,
                    })
                    .await?;
                    indexed += 1;
                }
            }
        }
        debug!(indexed, "index rebuilt");
        Ok(indexed)
    }
}

fn row_to_message(row: sqlx::sqlite::SqliteRow) -> IndexedMessage {
    IndexedMessage {
        id: row.get("id"),
        subject: row.get("subject"),
        sender: row.get("sender"),
        endpoint_hash: row.get("endpoint_hash"),
        status: MessageStatus::from_str(row.get::<String, _>("status").as_str()),
        created_at: row.get("created_at"),
        ttl: row.get("ttl"),
    }
}
