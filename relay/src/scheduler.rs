//! Cron orchestrator for Pulse dispatches.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cron::Schedule as CronSchedule;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};
use ulid::Ulid;

// Layer 3: Internal module imports
use crate::agent_runtime::{AgentRuntime, PermissionMode, SendMessageOptions, SessionOptions, StreamEvent};
use crate::core::{PublishOptions, RelayCore};
use crate::envelope::Budget;

/// Failure modes for scheduler and run-store operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The cron expression on a [`ScheduleDefinition`] failed to parse.
    #[error("invalid cron expression {0:?}: {1}")]
    InvalidCron(String, String),

    /// No schedule is registered under the given id.
    #[error("no schedule registered with id {0}")]
    UnknownSchedule(String),

    /// No run is registered under the given id.
    #[error("no run registered with id {0}")]
    UnknownRun(String),

    /// The publish pipeline reported a failure while dispatching.
    #[error("relay publish failed: {0}")]
    PublishFailed(String),
}

/// `{ active, paused, pending_approval }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Eligible to fire.
    Active,
    /// Temporarily disabled by the operator.
    Paused,
    /// Awaiting approval before it may run.
    PendingApproval,
}

/// A cron schedule definition, stored externally to this crate in
/// a real deployment; held in memory here as the authoritative copy the
/// scheduler dispatches against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDefinition {
    /// Unique schedule id.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The prompt dispatched to the agent runtime on each run.
    pub prompt: String,
    /// Standard 5 or 6-field cron expression.
    pub cron: String,
    /// Working directory for dispatched runs, if any.
    pub cwd: Option<String>,
    /// Whether this schedule currently fires at all.
    pub enabled: bool,
    /// Maximum runtime for a single run, in milliseconds.
    pub max_runtime_ms: Option<i64>,
    /// Permission mode applied to dispatched sessions.
    pub permission_mode: PermissionMode,
    /// Lifecycle status.
    pub status: ScheduleStatus,
}

/// `{ scheduled, running, completed, failed }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// A run record was opened but the dispatch hasn't been picked up yet.
    Scheduled,
    /// The dispatch is actively executing.
    Running,
    /// The dispatch finished successfully.
    Completed,
    /// The dispatch failed.
    Failed,
}

/// A single execution record for a [`ScheduleDefinition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    /// Unique run id.
    pub id: String,
    /// The schedule this run belongs to.
    pub schedule_id: String,
    /// What triggered this run (`"scheduled"` or `"manual"`).
    pub trigger: String,
    /// Lifecycle status.
    pub status: RunStatus,
    /// When the run record was opened.
    pub started_at: DateTime<Utc>,
    /// When the run reached a terminal state, if it has.
    pub finished_at: Option<DateTime<Utc>>,
    /// Captured output summary, on success.
    pub output: Option<String>,
    /// Failure reason, on failure.
    pub error: Option<String>,
}

/// Persistence boundary for [`Run`] records, generalized so both the
/// scheduler and [`crate::receiver::MessageReceiver`] can update run
/// lifecycle without a circular dependency between the two modules.
#[async_trait]
pub trait PulseRunStore: Send + Sync {
    /// Open a new run record in `Scheduled` status.
    async fn create_run(&self, schedule_id: &str, trigger: &str) -> Result<Run, SchedulerError>;

    /// Transition a run to `Running`.
    async fn mark_running(&self, run_id: &str) -> Result<(), SchedulerError>;

    /// Transition a run to `Completed` with a captured output summary.
    async fn mark_completed(&self, run_id: &str, output: String) -> Result<(), SchedulerError>;

    /// Transition a run to `Failed` with a reason.
    async fn mark_failed(&self, run_id: &str, reason: String) -> Result<(), SchedulerError>;

    /// The currently active (non-terminal) run for a schedule, if any.
    async fn active_run_for_schedule(&self, schedule_id: &str) -> Result<Option<Run>, SchedulerError>;

    /// Mark every run left in `Running` as `Failed` with reason
    /// `"Interrupted by server restart"`. Returns
    /// the number of runs recovered.
    async fn recover_interrupted(&self) -> Result<usize, SchedulerError>;

    /// Count of runs currently `Running`, for the global concurrency
    /// ceiling.
    async fn active_run_count(&self) -> Result<u32, SchedulerError>;

    /// Keep only the `keep_n` most recently started runs for `schedule_id`,
    /// discarding older ones regardless of status. Returns the number of
    /// runs discarded.
    async fn prune_runs(&self, schedule_id: &str, keep_n: usize) -> Result<usize, SchedulerError>;
}

/// A simple in-memory [`PulseRunStore`], sufficient for a single-process
/// deployment and for tests.
#[derive(Debug, Default)]
pub struct InMemoryRunStore {
    runs: RwLock<HashMap<String, Run>>,
}

impl InMemoryRunStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PulseRunStore for InMemoryRunStore {
    async fn create_run(&self, schedule_id: &str, trigger: &str) -> Result<Run, SchedulerError> {
        let run = Run {
            id: Ulid::new().to_string(),
            schedule_id: schedule_id.to_string(),
            trigger: trigger.to_string(),
            status: RunStatus::Scheduled,
            started_at: Utc::now(),
            finished_at: None,
            output: None,
            error: None,
        };
        self.runs.write().insert(run.id.clone(), run.clone());
        Ok(run)
    }

    async fn mark_running(&self, run_id: &str) -> Result<(), SchedulerError> {
        let mut runs = self.runs.write();
        let run = runs
            .get_mut(run_id)
            .ok_or_else(|| SchedulerError::UnknownRun(run_id.to_string()))?;
        run.status = RunStatus::Running;
        Ok(())
    }

    async fn mark_completed(&self, run_id: &str, output: String) -> Result<(), SchedulerError> {
        let mut runs = self.runs.write();
        let run = runs
            .get_mut(run_id)
            .ok_or_else(|| SchedulerError::UnknownRun(run_id.to_string()))?;
        run.status = RunStatus::Completed;
        run.output = Some(output);
        run.finished_at = Some(Utc::now());
        Ok(())
    }

    async fn mark_failed(&self, run_id: &str, reason: String) -> Result<(), SchedulerError> {
        let mut runs = self.runs.write();
        let run = runs
            .get_mut(run_id)
            .ok_or_else(|| SchedulerError::UnknownRun(run_id.to_string()))?;
        run.status = RunStatus::Failed;
        run.error = Some(reason);
        run.finished_at = Some(Utc::now());
        Ok(())
    }

    async fn active_run_for_schedule(&self, schedule_id: &str) -> Result<Option<Run>, SchedulerError> {
        Ok(self
            .runs
            .read()
            .values()
            .find(|r| {
                r.schedule_id == schedule_id
                    && matches!(r.status, RunStatus::Scheduled | RunStatus::Running)
            })
            .cloned())
    }

    async fn recover_interrupted(&self) -> Result<usize, SchedulerError> {
        let mut runs = self.runs.write();
        let mut recovered = 0;
        for run in runs.values_mut() {
            if run.status == RunStatus::Running {
                run.status = RunStatus::Failed;
                run.error = Some("Interrupted by server restart".to_string());
                run.finished_at = Some(Utc::now());
                recovered += 1;
            }
        }
        Ok(recovered)
    }

    async fn active_run_count(&self) -> Result<u32, SchedulerError> {
        Ok(self
            .runs
            .read()
            .values()
            .filter(|r| matches!(r.status, RunStatus::Scheduled | RunStatus::Running))
            .count() as u32)
    }

    async fn prune_runs(&self, schedule_id: &str, keep_n: usize) -> Result<usize, SchedulerError> {
        let mut runs = self.runs.write();
        let mut ids: Vec<(String, DateTime<Utc>)> = runs
            .values()
            .filter(|r| r.schedule_id == schedule_id)
            .map(|r| (r.id.clone(), r.started_at))
            .collect();
        ids.sort_by(|a, b| b.1.cmp(&a.1));
        let discarded: Vec<String> = ids.into_iter().skip(keep_n).map(|(id, _)| id).collect();
        let count = discarded.len();
        for id in discarded {
            runs.remove(&id);
        }
        Ok(count)
    }
}

/// Outcome of a single [`Scheduler::dispatch_tick`] call, for tests and
/// observability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A run was opened and dispatched.
    Dispatched {
        /// The opened run's id.
        run_id: String,
    },
    /// Skipped: the global concurrency ceiling was saturated.
    SkippedConcurrencyCeiling,
    /// Skipped: the schedule already has an active run.
    SkippedOverlap,
    /// Skipped: the schedule is disabled or not active.
    SkippedInactive,
    /// No subject matched the Relay publish; the run was marked failed.
    NoRelayReceiver,
}

/// Which downstream the scheduler drives on each dispatch: through Relay's
/// publish pipeline, or straight to the agent runtime (legacy path), per the
/// `RELAY_ENABLED` feature flag.
enum DispatchMode {
    Relay(Arc<RelayCore>),
    Direct(Arc<dyn AgentRuntime>),
}

/// The cron dispatch orchestrator. Either bridges to Relay or calls the
/// agent runtime directly, depending on [`DispatchMode`].
pub struct Scheduler {
    schedules: Arc<DashMap<String, ScheduleDefinition>>,
    run_store: Arc<dyn PulseRunStore>,
    mode: DispatchMode,
    max_concurrent_runs: u32,
    /// Runs retained per schedule after [`Self::recover_on_startup`] prunes
    /// older history (§4.15 "retention pruning is applied").
    retention_per_schedule: usize,
    shutting_down: Arc<std::sync::atomic::AtomicBool>,
}

/// Default number of runs retained per schedule by [`Scheduler::recover_on_startup`].
const DEFAULT_RUN_RETENTION: usize = 50;

impl Scheduler {
    /// Construct a scheduler bridging dispatches through Relay.
    pub fn new_relay_mode(
        run_store: Arc<dyn PulseRunStore>,
        core: Arc<RelayCore>,
        max_concurrent_runs: u32,
    ) -> Self {
        Self {
            schedules: Arc::new(DashMap::new()),
            run_store,
            mode: DispatchMode::Relay(core),
            max_concurrent_runs,
            retention_per_schedule: DEFAULT_RUN_RETENTION,
            shutting_down: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }

    /// Construct a scheduler that calls the agent runtime directly
    /// (legacy path, used when `RELAY_ENABLED` is off).
    pub fn new_direct_mode(
        run_store: Arc<dyn PulseRunStore>,
        agent_runtime: Arc<dyn AgentRuntime>,
        max_concurrent_runs: u32,
    ) -> Self {
        Self {
            schedules: Arc::new(DashMap::new()),
            run_store,
            mode: DispatchMode::Direct(agent_runtime),
            max_concurrent_runs,
            retention_per_schedule: DEFAULT_RUN_RETENTION,
            shutting_down: Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }

    /// Override how many runs are retained per schedule on startup recovery
    /// (default [`DEFAULT_RUN_RETENTION`]).
    pub fn with_run_retention(mut self, keep_n: usize) -> Self {
        self.retention_per_schedule = keep_n;
        self
    }

    /// Register or replace a schedule definition.
    pub fn upsert_schedule(&self, schedule: ScheduleDefinition) -> Result<(), SchedulerError> {
        CronSchedule::from_str(&schedule.cron)
            .map_err(|e| SchedulerError::InvalidCron(schedule.cron.clone(), e.to_string()))?;
        self.schedules.insert(schedule.id.clone(), schedule);
        Ok(())
    }

    /// Remove a schedule definition.
    pub fn remove_schedule(&self, id: &str) {
        self.schedules.remove(id);
    }

    /// Recover any run left `Running` across a restart, then prune each
    /// registered schedule's run history down to
    /// [`Self::retention_per_schedule`] (§4.15).
    pub async fn recover_on_startup(&self) -> Result<usize, SchedulerError> {
        let recovered = self.run_store.recover_interrupted().await?;
        for entry in self.schedules.iter() {
            self.run_store
                .prune_runs(entry.key(), self.retention_per_schedule)
                .await?;
        }
        Ok(recovered)
    }

    /// Stop accepting further [`Self::dispatch_tick`] calls, then wait up to
    /// `grace` (30s in production use) for every currently active run to
    /// reach a terminal state before returning. Idempotent.
    pub async fn shutdown(&self, grace: std::time::Duration) {
        self.shutting_down.store(true, Ordering::SeqCst);
        let deadline = tokio::time::Instant::now() + grace;
        loop {
            match self.run_store.active_run_count().await {
                Ok(0) | Err(_) => return,
                Ok(_) if tokio::time::Instant::now() >= deadline => return,
                Ok(_) => tokio::time::sleep(std::time::Duration::from_millis(100)).await,
            }
        }
    }

    /// Run the dispatch ordering contract for a single schedule: concurrency ceiling, overlap protection, re-read
    /// enabled/active, open a run, and dispatch.
    #[instrument(skip(self))]
    pub async fn dispatch_tick(&self, schedule_id: &str) -> Result<DispatchOutcome, SchedulerError> {
        if self.shutting_down.load(Ordering::SeqCst) {
            return Ok(DispatchOutcome::SkippedInactive);
        }

        if self.run_store.active_run_count().await? >= self.max_concurrent_runs {
            warn!(schedule_id, "concurrency ceiling reached, skipping tick");
            return Ok(DispatchOutcome::SkippedConcurrencyCeiling);
        }

        if self
            .run_store
            .active_run_for_schedule(schedule_id)
            .await?
            .is_some()
        {
            return Ok(DispatchOutcome::SkippedOverlap);
        }

        let schedule = self
            .schedules
            .get(schedule_id)
            .ok_or_else(|| SchedulerError::UnknownSchedule(schedule_id.to_string()))?
            .clone();
        if !schedule.enabled || schedule.status != ScheduleStatus::Active {
            return Ok(DispatchOutcome::SkippedInactive);
        }

        let run = self.run_store.create_run(schedule_id, "scheduled").await?;

        match &self.mode {
            DispatchMode::Relay(core) => self.dispatch_relay_mode(core, &schedule, &run).await,
            DispatchMode::Direct(agent_runtime) => {
                self.dispatch_direct_mode(agent_runtime, &schedule, &run).await
            }
        }
    }

    async fn dispatch_relay_mode(
        &self,
        core: &Arc<RelayCore>,
        schedule: &ScheduleDefinition,
        run: &Run,
    ) -> Result<DispatchOutcome, SchedulerError> {
        let payload = serde_json::json!({
            "type": "pulse_dispatch",
            "scheduleId": schedule.id,
            "runId": run.id,
            "prompt": schedule.prompt,
            "cwd": schedule.cwd,
            "permissionMode": schedule.permission_mode,
            "scheduleName": schedule.name,
            "cron": schedule.cron,
            "trigger": run.trigger,
        });

        let ttl_ms = schedule.max_runtime_ms.unwrap_or(60 * 60 * 1000);
        let budget = Budget {
            hop_count: 0,
            max_hops: 3,
            ancestor_chain: Vec::new(),
            ttl: Utc::now().timestamp_millis() + ttl_ms,
            call_budget_remaining: 10,
        };

        let subject = format!("relay.system.pulse.{}", schedule.id);
        let reply_to = format!("{subject}.response");

        let outcome = core
            .publish(
                &subject,
                payload,
                PublishOptions {
                    from: "relay.system.pulse".to_string(),
                    reply_to: Some(reply_to),
                    budget: Some(budget),
                    trace_id: None,
                },
            )
            .await
            .map_err(|e| SchedulerError::PublishFailed(e.to_string()))?;

        if outcome.delivered_to == 0 {
            self.run_store
                .mark_failed(&run.id, "No Relay receiver for Pulse dispatch".to_string())
                .await?;
            return Ok(DispatchOutcome::NoRelayReceiver);
        }

        Ok(DispatchOutcome::Dispatched { run_id: run.id.clone() })
    }

    async fn dispatch_direct_mode(
        &self,
        agent_runtime: &Arc<dyn AgentRuntime>,
        schedule: &ScheduleDefinition,
        run: &Run,
    ) -> Result<DispatchOutcome, SchedulerError> {
        self.run_store.mark_running(&run.id).await?;

        let session_id = Ulid::new().to_string();
        agent_runtime
            .ensure_session(
                &session_id,
                SessionOptions {
                    cwd: schedule.cwd.clone(),
                    permission_mode: schedule.permission_mode,
                },
            )
            .await
            .map_err(|e| SchedulerError::PublishFailed(e.to_string()))?;

        let summary = Arc::new(parking_lot::Mutex::new(String::new()));
        let summary_for_closure = summary.clone();
        let result = agent_runtime
            .send_message(
                &session_id,
                &schedule.prompt,
                SendMessageOptions::default(),
                Box::new(move |event| {
                    if let StreamEvent::TextDelta { text } = event {
                        let mut s = summary_for_closure.lock();
                        if s.len() < 1000 {
                            s.push_str(&text);
                            s.truncate(1000);
                        }
                    }
                }),
            )
            .await;

        match result {
            Ok(()) => {
                let output = summary.lock().clone();
                self.run_store.mark_completed(&run.id, output).await?;
                Ok(DispatchOutcome::Dispatched { run_id: run.id.clone() })
            }
            Err(err) => {
                self.run_store.mark_failed(&run.id, err.to_string()).await?;
                Err(SchedulerError::PublishFailed(err.to_string()))
            }
        }
    }

    /// List the ids of currently registered schedules whose cron
    /// expression matches `now` (used by a caller-driven polling loop; this
    /// crate does not itself own a wall-clock timer thread).
    pub fn due_schedules(&self, now: DateTime<Utc>) -> Vec<String> {
        self.schedules
            .iter()
            .filter_map(|entry| {
                let schedule = entry.value();
                let parsed = CronSchedule::from_str(&schedule.cron).ok()?;
                if parsed.includes(now) {
                    Some(schedule.id.clone())
                } else {
                    None
                }
            })
            .collect()
    }
}
