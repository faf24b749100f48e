//! Delivery trace store: one span per delivery attempt, used for
//! debugging and aggregate latency/error metrics.

// Layer 1: Standard library imports
use std::path::Path;

// Layer 2: Third-party crate imports
use serde::{Serialize, Serializer};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, instrument};

/// Failure modes for [`TraceStore`] operations.
#[derive(Debug, Error)]
pub enum TraceStoreError {
    /// Underlying `sqlx`/SQLite failure.
    #[error("trace store database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Lifecycle state of a single delivery span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStatus {
    /// Handed to the maildir, not yet claimed.
    Pending,
    /// Claimed by the receiving endpoint.
    Delivered,
    /// Handler completed successfully.
    Processed,
    /// Handler raised.
    Failed,
    /// Written to `failed/` with no further retry possible.
    DeadLettered,
}

impl SpanStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Processed => "processed",
            Self::Failed => "failed",
            Self::DeadLettered => "dead_lettered",
        }
    }

    fn from_str(s: &str) -> Self {
        match s {
            "delivered" => Self::Delivered,
            "processed" => Self::Processed,
            "failed" => Self::Failed,
            "dead_lettered" => Self::DeadLettered,
            _ => Self::Pending,
        }
    }
}

impl Serialize for SpanStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One row of `message_traces`. Timestamps are epoch-millisecond
/// integers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSpan {
    /// The message id this span tracks (primary key).
    pub message_id: String,
    /// Correlates a root message with its replies/republishes.
    pub trace_id: String,
    /// This span's own id.
    pub span_id: String,
    /// The span this one was caused by, if any.
    pub parent_span_id: Option<String>,
    /// Target subject.
    pub subject: String,
    /// Sender endpoint hash (or subject, for un-registered senders).
    pub from_endpoint: String,
    /// Destination endpoint hash.
    pub to_endpoint: String,
    /// Current lifecycle state.
    pub status: SpanStatus,
    /// `budget.hopCount` at the time this span was opened.
    pub budget_hops_used: Option<u32>,
    /// `budget.ttl - now` in milliseconds at the time this span was opened.
    pub budget_ttl_remaining_ms: Option<i64>,
    /// When the message was handed to the maildir.
    pub sent_at: i64,
    /// When the message was claimed, if it has been.
    pub delivered_at: Option<i64>,
    /// When the handler finished, if it has.
    pub processed_at: Option<i64>,
    /// Rejection/exception reason, if the span ended in failure.
    pub error: Option<String>,
}

/// A partial update applied by [`TraceStore::update_span`]: only `Some`
/// fields are written; the rest of the row is left untouched.
#[derive(Debug, Clone, Default)]
pub struct SpanUpdate {
    /// New status, if transitioning.
    pub status: Option<SpanStatus>,
    /// Stamp `delivered_at`.
    pub delivered_at: Option<i64>,
    /// Stamp `processed_at`.
    pub processed_at: Option<i64>,
    /// Record a rejection/exception reason.
    pub error: Option<String>,
}

/// Aggregate delivery metrics returned by [`TraceStore::get_metrics`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMetrics {
    /// Row count.
    pub total_messages: i64,
    /// `status IN ('delivered', 'processed')`.
    pub delivered_count: i64,
    /// `status = 'failed'`.
    pub failed_count: i64,
    /// `status = 'dead_lettered'`.
    pub dead_lettered_count: i64,
    /// `AVG(delivered_at - sent_at)` over spans with `delivered_at` set.
    pub avg_delivery_latency_ms: f64,
    /// 95th percentile of the same distribution.
    pub p95_delivery_latency_ms: f64,
    /// Distinct `to_endpoint` where `status != 'dead_lettered'`.
    pub active_endpoints: i64,
    /// Count of spans whose `error` matches each budget rejection tag.
    pub budget_rejections: BudgetRejectionCounts,
}

/// Per-[`crate::envelope::BudgetRejection`] tag counters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRejectionCounts {
    /// `error LIKE '%hop_limit_exceeded%'`.
    pub hop_limit_exceeded: i64,
    /// `error LIKE '%cycle_detected%'`.
    pub cycle_detected: i64,
    /// `error LIKE '%ttl_expired%'`.
    pub ttl_expired: i64,
    /// `error LIKE '%budget_exhausted%'`.
    pub budget_exhausted: i64,
}

/// SQLite-backed store of delivery spans, opened in WAL mode.
#[derive(Debug, Clone)]
pub struct TraceStore {
    pool: SqlitePool,
}

impl TraceStore {
    /// Open (creating if absent) the trace database at `path`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn open(path: &Path) -> Result<Self, TraceStoreError> {
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

    /// In-memory store, for tests.
    pub async fn open_in_memory() -> Result<Self, TraceStoreError> {
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

    async fn migrate(pool: &SqlitePool) -> Result<(), TraceStoreError> {
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(pool)
            .await?;
        if version < 1 {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS message_traces (
                    message_id TEXT PRIMARY KEY,
                    trace_id TEXT NOT NULL,
                    span_id TEXT NOT NULL,
                    parent_span_id TEXT,
                    subject TEXT NOT NULL,
                    from_endpoint TEXT NOT NULL,
                    to_endpoint TEXT NOT NULL,
                    status TEXT NOT NULL DEFAULT 'pending',
                    budget_hops_used INTEGER,
                    budget_ttl_remaining_ms INTEGER,
                    sent_at INTEGER NOT NULL,
                    delivered_at INTEGER,
                    processed_at INTEGER,
                    error TEXT
                )
                "#,
            )
            .execute(pool)
            .await?;
            sqlx::query("CREATE INDEX IF NOT EXISTS idx_traces_trace_id ON message_traces(trace_id)")
                .execute(pool)
                .await?;
            sqlx::query("CREATE INDEX IF NOT EXISTS idx_traces_subject ON message_traces(subject)")
                .execute(pool)
                .await?;
            sqlx::query(
                "CREATE INDEX IF NOT EXISTS idx_traces_sent_at ON message_traces(sent_at DESC)",
            )
            .execute(pool)
            .await?;
            sqlx::query(
                "CREATE INDEX IF NOT EXISTS idx_traces_dead_lettered ON message_traces(status) WHERE status = 'dead_lettered'",
            )
            .execute(pool)
            .await?;
            sqlx::query("PRAGMA user_version = 1").execute(pool).await?;
            debug!("trace schema migrated to v1");
        }
        Ok(())
    }

    /// Open a new span. `trace_id`/`parent_span_id` propagate the
    /// correlation established at [`crate::core::RelayCore::publish`]'s
    /// root envelope.
    pub async fn insert_span(&self, span: &TraceSpan) -> Result<(), TraceStoreError> {
        sqlx::query(
            "INSERT OR REPLACE INTO message_traces (message_id, trace_id, span_id, parent_span_id, subject, from_endpoint, to_endpoint, status, budget_hops_used, budget_ttl_remaining_ms, sent_at, delivered_at, processed_at, error) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&span.message_id)
        .bind(&span.trace_id)
        .bind(&span.span_id)
        .bind(&span.parent_span_id)
        .bind(&span.subject)
        .bind(&span.from_endpoint)
        .bind(&span.to_endpoint)
        .bind(span.status.as_str())
        .bind(span.budget_hops_used)
        .bind(span.budget_ttl_remaining_ms)
        .bind(span.sent_at)
        .bind(span.delivered_at)
        .bind(span.processed_at)
        .bind(&span.error)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Apply a partial update to an existing span: only
    /// the `Some` fields of `update` are written.
    pub async fn update_span(
        &self,
        message_id: &str,
        update: &SpanUpdate,
    ) -> Result<(), TraceStoreError> {
        sqlx::query(
            "UPDATE message_traces SET status = COALESCE(?, status), delivered_at = COALESCE(?, delivered_at), processed_at = COALESCE(?, processed_at), error = COALESCE(?, error) WHERE message_id = ?",
        )
        .bind(update.status.map(SpanStatus::as_str))
        .bind(update.delivered_at)
        .bind(update.processed_at)
        .bind(update.error.as_deref())
        .bind(message_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fetch the span for a single message id.
    pub async fn get_span_by_message_id(
        &self,
        message_id: &str,
    ) -> Result<Option<TraceSpan>, TraceStoreError> {
        let row = sqlx::query("SELECT * FROM message_traces WHERE message_id = ?")
            .bind(message_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(row_to_span))
    }

    /// Fetch every span sharing `trace_id`, ordered by `sent_at`.
    pub async fn get_trace(&self, trace_id: &str) -> Result<Vec<TraceSpan>, TraceStoreError> {
        let rows = sqlx::query("SELECT * FROM message_traces WHERE trace_id = ? ORDER BY sent_at ASC")
            .bind(trace_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_span).collect())
    }

    /// Compute aggregate delivery metrics.
    pub async fn get_metrics(&self) -> Result<DeliveryMetrics, TraceStoreError> {
        let total_messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM message_traces")
            .fetch_one(&self.pool)
            .await?;
        let delivered_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM message_traces WHERE status IN ('delivered', 'processed')",
        )
        .fetch_one(&self.pool)
        .await?;
        let failed_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM message_traces WHERE status = 'failed'")
                .fetch_one(&self.pool)
                .await?;
        let dead_lettered_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM message_traces WHERE status = 'dead_lettered'",
        )
        .fetch_one(&self.pool)
        .await?;

        let pairs: Vec<(i64, i64)> = sqlx::query(
            "SELECT sent_at, delivered_at FROM message_traces WHERE delivered_at IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|row| {
            let sent_at: i64 = row.get("sent_at");
            let delivered_at: i64 = row.get("delivered_at");
            (sent_at, delivered_at)
        })
        .collect();

        let mut samples: Vec<f64> = pairs
            .iter()
            .map(|(sent, delivered)| (delivered - sent) as f64)
            .collect();
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let avg_delivery_latency_ms = if samples.is_empty() {
            0.0
        } else {
            samples.iter().sum::<f64>() / samples.len() as f64
        };
        let p95_delivery_latency_ms = percentile(&samples, 0.95);

        let active_endpoints: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT to_endpoint) FROM message_traces WHERE status != 'dead_lettered'",
        )
        .fetch_one(&self.pool)
        .await?;

        let budget_rejections = BudgetRejectionCounts {
            hop_limit_exceeded: count_error_like(&self.pool, "%hop_limit_exceeded%").await?,
            cycle_detected: count_error_like(&self.pool, "%cycle_detected%").await?,
            ttl_expired: count_error_like(&self.pool, "%ttl_expired%").await?,
            budget_exhausted: count_error_like(&self.pool, "%budget_exhausted%").await?,
        };

        Ok(DeliveryMetrics {
            total_messages,
            delivered_count,
            failed_count,
            dead_lettered_count,
            avg_delivery_latency_ms,
            p95_delivery_latency_ms,
            active_endpoints,
            budget_rejections,
        })
    }
}

async fn count_error_like(pool: &SqlitePool, pattern: &str) -> Result<i64, TraceStoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM message_traces WHERE error LIKE ?")
        .bind(pattern)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p * (sorted.len() as f64 - 1.0)).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

fn row_to_span(row: sqlx::sqlite::SqliteRow) -> TraceSpan {
    TraceSpan {
        message_id: row.get("message_id"),
        trace_id: row.get("trace_id"),
        span_id: row.get("span_id"),
        parent_span_id: row.get("parent_span_id"),
        subject: row.get("subject"),
        from_endpoint: row.get("from_endpoint"),
        to_endpoint: row.get("to_endpoint"),
        status: SpanStatus::from_str(row.get::<String, _>("status").as_str()),
        budget_hops_used: row.get::<Option<i64>, _>("budget_hops_used").map(|v| v as u32),
        budget_ttl_remaining_ms: row.get("budget_ttl_remaining_ms"),
        sent_at: row.get("sent_at"),
        delivered_at: row.get("delivered_at"),
        processed_at: row.get("processed_at"),
        error: row.get("error"),
    }
}
