//! Bridge from Relay subscriptions into the external agent runtime.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{error, instrument, warn};

// Layer 3: Internal module imports
use crate::agent_runtime::{AgentRuntime, PermissionMode, SendMessageOptions, SessionOptions, StreamEvent};
use crate::core::{PublishOptions, RelayCore};
use crate::envelope::Envelope;
use crate::error::RelayError;
use crate::scheduler::PulseRunStore;
use crate::store::trace::{SpanStatus, SpanUpdate};
use crate::subject::Subject;

/// Maximum characters of streamed assistant text captured as a Pulse run's
/// output summary.
const OUTPUT_SUMMARY_CAP: usize = 1000;

/// Shape of a Pulse dispatch payload, as published by
/// [`crate::scheduler::Scheduler`] to `relay.system.pulse.<scheduleId>`.
///
/// Every field is required by §4.13: a payload missing one, or carrying a
/// `type` other than `"pulse_dispatch"`, is malformed and dead-lettered
/// without ever invoking the agent runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseDispatchPayload {
    /// Discriminant; must equal `"pulse_dispatch"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The schedule this dispatch belongs to.
    pub schedule_id: String,
    /// The run record already opened for this dispatch.
    pub run_id: String,
    /// The prompt to send to the agent runtime.
    pub prompt: String,
    /// Working directory for the session, if any.
    pub cwd: Option<String>,
    /// Permission mode to apply.
    pub permission_mode: PermissionMode,
    /// Human-readable schedule name, carried through for observability.
    pub schedule_name: String,
    /// The cron expression that produced this dispatch.
    pub cron: String,
    /// What triggered this run (`"scheduled"` or `"manual"`).
    pub trigger: String,
}

/// Bridges `relay.agent.>` and `relay.system.pulse.>` traffic into an
/// [`AgentRuntime`], republishing the runtime's stream back through Relay
/// when a reply-to subject is present.
pub struct MessageReceiver {
    core: Arc<RelayCore>,
    agent_runtime: Arc<dyn AgentRuntime>,
    run_store: Option<Arc<dyn PulseRunStore>>,
}

impl MessageReceiver {
    /// Construct a receiver. `run_store` is only needed to service Pulse
    /// dispatches; a receiver used purely for interactive agent sessions may
    /// omit it.
    pub fn new(
        core: Arc<RelayCore>,
        agent_runtime: Arc<dyn AgentRuntime>,
        run_store: Option<Arc<dyn PulseRunStore>>,
    ) -> Self {
        Self {
            core,
            agent_runtime,
            run_store,
        }
    }

    /// Register the two subscriptions this bridge owns. Each handler spawns
    /// an async task so the synchronous `Handler` callback never blocks the
    /// publish pipeline on agent-runtime I/O.
    pub fn start(self: Arc<Self>) -> Result<(), RelayError> {
        let agent_self = self.clone();
        self.core.subscribe(
            "relay.agent.>",
            Arc::new(move |_subject, payload, envelope| {
                let receiver = agent_self.clone();
                let envelope = envelope.clone();
                let payload = payload.clone();
                tokio::spawn(async move {
                    receiver.handle_agent_message(&envelope, payload).await;
                });
            }),
        )?;

        let pulse_self = self.clone();
        self.core.subscribe(
            "relay.system.pulse.>",
            Arc::new(move |_subject, payload, envelope| {
                let receiver = pulse_self.clone();
                let envelope = envelope.clone();
                let payload = payload.clone();
                tokio::spawn(async move {
                    receiver.handle_pulse_message(&envelope, payload).await;
                });
            }),
        )?;

        Ok(())
    }

    /// Handle one `relay.agent.<sessionId>` delivery: stream the agent
    /// runtime's reply and republish each event to `replyTo`, if set, with
    /// the budget advanced one hop.
    #[instrument(skip(self, envelope, payload), fields(message_id = %envelope.id))]
    async fn handle_agent_message(&self, envelope: &Envelope, payload: serde_json::Value) {
        let Some(session_id) = envelope.subject.rsplit('.').next() else {
            warn!(subject = %envelope.subject, "agent subject has no session token");
            return;
        };
        let session_id = session_id.to_string();

        let content = payload
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        if let Err(err) = self
            .agent_runtime
            .ensure_session(
                &session_id,
                SessionOptions {
                    cwd: payload
                        .get("cwd")
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string()),
                    permission_mode: PermissionMode::Default,
                },
            )
            .await
        {
            error!(session_id, error = %err, "failed to ensure agent session");
            self.mark_trace_failed(envelope, &err.to_string()).await;
            return;
        }

        let reply_to = envelope.reply_to.clone();
        let core = self.core.clone();
        let from = envelope.subject.clone();
        let carried_budget = envelope.budget.clone();

        let result = self
            .agent_runtime
            .send_message(
                &session_id,
                &content,
                SendMessageOptions::default(),
                Box::new(move |event| {
                    let Some(reply_to) = reply_to.clone() else {
                        return;
                    };
                    let core = core.clone();
                    let from = from.clone();
                    let budget = carried_budget.clone();
                    let payload = stream_event_payload(&event);
                    tokio::spawn(async move {
                        let _ = core
                            .publish(
                                &reply_to,
                                payload,
                                PublishOptions {
                                    from,
                                    reply_to: None,
                                    budget: Some(budget),
                                    trace_id: None,
                                },
                            )
                            .await;
                    });
                }),
            )
            .await;

        match result {
            Ok(()) => {
                self.mark_trace_delivered(envelope).await;
            }
            Err(err) => {
                error!(session_id, error = %err, "agent runtime stream failed");
                self.mark_trace_failed(envelope, &err.to_string()).await;
            }
        }
    }

    /// Handle one `relay.system.pulse.<scheduleId>` delivery: run the
    /// scheduled prompt, collect a capped output summary, finalize the
    /// Pulse run record, and republish to `replyTo` if the scheduler
    /// supplied one.
    #[instrument(skip(self, envelope, payload), fields(message_id = %envelope.id))]
    async fn handle_pulse_message(&self, envelope: &Envelope, payload: serde_json::Value) {
        let dispatch: PulseDispatchPayload = match serde_json::from_value(payload) {
            Ok(dispatch) if dispatch.kind == "pulse_dispatch" => dispatch,
            Ok(dispatch) => {
                let reason = format!("malformed pulse payload: unexpected type {:?}", dispatch.kind);
                warn!(%reason, "malformed pulse dispatch payload, dropping");
                self.mark_trace_dead_lettered(envelope, &reason).await;
                return;
            }
            Err(err) => {
                warn!(error = %err, "malformed pulse dispatch payload, dropping");
                self.mark_trace_dead_lettered(envelope, &format!("malformed pulse payload: {err}"))
                    .await;
                return;
            }
        };

        let Some(run_store) = &self.run_store else {
            warn!("pulse dispatch received but receiver has no run store configured");
            return;
        };

        if let Err(err) = run_store.mark_running(&dispatch.run_id).await {
            error!(run_id = %dispatch.run_id, error = %err, "failed to mark pulse run running");
            return;
        }

        let session_id = ulid::Ulid::new().to_string();
        if let Err(err) = self
            .agent_runtime
            .ensure_session(
                &session_id,
                SessionOptions {
                    cwd: dispatch.cwd.clone(),
                    permission_mode: dispatch.permission_mode,
                },
            )
            .await
        {
            let reason = err.to_string();
            let _ = run_store.mark_failed(&dispatch.run_id, reason.clone()).await;
            self.mark_trace_failed(envelope, &reason).await;
            return;
        }

        let own_subject = match Subject::concrete(envelope.subject.clone()) {
            Ok(subject) => subject,
            Err(err) => {
                self.mark_trace_failed(envelope, &err.to_string()).await;
                return;
            }
        };

        let summary = Arc::new(Mutex::new(String::new()));
        let reply_to = envelope.reply_to.clone();
        let core = self.core.clone();
        let from = envelope.subject.clone();
        let advanced_budget = envelope.budget.advance(&own_subject);
        let summary_for_closure = summary.clone();

        // The budget's TTL is an upper wall-clock bound on this run (§5):
        // exceeding it aborts the stream even if the agent runtime never
        // itself returns.
        let remaining_ms = (envelope.budget.ttl - chrono::Utc::now().timestamp_millis()).max(0);
        let budget_deadline = tokio::time::Duration::from_millis(remaining_ms as u64);

        let send = self.agent_runtime.send_message(
            &session_id,
            &dispatch.prompt,
            SendMessageOptions::default(),
            Box::new(move |event| {
                if let StreamEvent::TextDelta { text } = &event {
                    let mut s = summary_for_closure.lock();
                    if s.len() < OUTPUT_SUMMARY_CAP {
                        s.push_str(text);
                        s.truncate(OUTPUT_SUMMARY_CAP);
                    }
                }
                let Some(reply_to) = reply_to.clone() else {
                    return;
                };
                let core = core.clone();
                let from = from.clone();
                let budget = advanced_budget.clone();
                let payload = stream_event_payload(&event);
                tokio::spawn(async move {
                    let _ = core
                        .publish(
                            &reply_to,
                            payload,
                            PublishOptions {
                                from,
                                reply_to: None,
                                budget: Some(budget),
                                trace_id: None,
                            },
                        )
                        .await;
                });
            }),
        );

        match tokio::time::timeout(budget_deadline, send).await {
            Ok(Ok(())) => {
                let output = summary.lock().clone();
                let _ = run_store.mark_completed(&dispatch.run_id, output).await;
                self.mark_trace_delivered(envelope).await;
            }
            Ok(Err(err)) => {
                let reason = err.to_string();
                let _ = run_store.mark_failed(&dispatch.run_id, reason.clone()).await;
                self.mark_trace_failed(envelope, &reason).await;
            }
            Err(_elapsed) => {
                let reason = "Pulse run exceeded budget TTL".to_string();
                warn!(run_id = %dispatch.run_id, "pulse run aborted: budget TTL exceeded");
                let _ = run_store.mark_failed(&dispatch.run_id, reason.clone()).await;
                self.mark_trace_failed(envelope, &reason).await;
            }
        }
    }

    async fn mark_trace_delivered(&self, envelope: &Envelope) {
        if let Err(err) = self
            .core
            .update_trace_span(
                &envelope.id,
                &SpanUpdate {
                    status: Some(SpanStatus::Delivered),
                    delivered_at: Some(chrono::Utc::now().timestamp_millis()),
                    ..Default::default()
                },
            )
            .await
        {
            warn!(message_id = %envelope.id, error = %err, "failed to update trace span");
        }
    }

    async fn mark_trace_failed(&self, envelope: &Envelope, reason: &str) {
        if let Err(err) = self
            .core
            .update_trace_span(
                &envelope.id,
                &SpanUpdate {
                    status: Some(SpanStatus::Failed),
                    error: Some(reason.to_string()),
                    ..Default::default()
                },
            )
            .await
        {
            warn!(message_id = %envelope.id, error = %err, "failed to update trace span");
        }
    }

    /// A payload rejected before execution (malformed Pulse dispatch) is
    /// dead-lettered rather than merely failed, per §4.13 step 1: it was
    /// never run, so it belongs in `DeliveryMetrics::dead_lettered_count`
    /// alongside budget-enforcer rejections, not alongside a run that
    /// executed and then failed.
    async fn mark_trace_dead_lettered(&self, envelope: &Envelope, reason: &str) {
        if let Err(err) = self
            .core
            .update_trace_span(
                &envelope.id,
                &SpanUpdate {
                    status: Some(SpanStatus::DeadLettered),
                    error: Some(reason.to_string()),
                    ..Default::default()
                },
            )
            .await
        {
            warn!(message_id = %envelope.id, error = %err, "failed to update trace span");
        }
    }
}

fn stream_event_payload(event: &StreamEvent) -> serde_json::Value {
    serde_json::to_value(event).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use crate::scheduler::InMemoryRunStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct EchoAgentRuntime {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AgentRuntime for EchoAgentRuntime {
        async fn ensure_session(
            &self,
            _session_id: &str,
            _options: SessionOptions,
        ) -> Result<(), crate::agent_runtime::AgentRuntimeError> {
            Ok(())
        }

        async fn send_message(
            &self,
            _session_id: &str,
            content: &str,
            _options: SendMessageOptions,
            mut on_event: Box<dyn FnMut(StreamEvent) + Send>,
        ) -> Result<(), crate::agent_runtime::AgentRuntimeError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            on_event(StreamEvent::TextDelta {
                text: format!("echo: {content}"),
            });
            on_event(StreamEvent::Done);
            Ok(())
        }
    }

    async fn test_core() -> (Arc<RelayCore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = RelayConfig::builder().with_data_dir(dir.path()).build().unwrap();
        (Arc::new(RelayCore::new(config).await.unwrap()), dir)
    }

    #[tokio::test]
    async fn test_agent_message_republishes_stream_to_reply_to() {
        let (core, _dir) = test_core().await;
        core.register_endpoint("relay.human.console.c1").unwrap();

        let agent_runtime = Arc::new(EchoAgentRuntime {
            calls: AtomicUsize::new(0),
        });
        let receiver = Arc::new(MessageReceiver::new(core.clone(), agent_runtime.clone(), None));
        receiver.start().unwrap();

        core.publish(
            "relay.agent.sess1",
            serde_json::json!({"content": "hello"}),
            PublishOptions {
                from: "relay.human.console.c1".to_string(),
                reply_to: Some("relay.human.console.c1".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(agent_runtime.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_pulse_message_marks_run_completed() {
        let (core, _dir) = test_core().await;
        let agent_runtime = Arc::new(EchoAgentRuntime {
            calls: AtomicUsize::new(0),
        });
        let run_store = Arc::new(InMemoryRunStore::new());
        let run = run_store.create_run("sched1", "scheduled").await.unwrap();

        let receiver = Arc::new(MessageReceiver::new(
            core.clone(),
            agent_runtime.clone(),
            Some(run_store.clone() as Arc<dyn PulseRunStore>),
        ));
        receiver.start().unwrap();

        core.publish(
            "relay.system.pulse.sched1",
            serde_json::json!({
                "type": "pulse_dispatch",
                "scheduleId": "sched1",
                "runId": run.id,
                "prompt": "summarize today",
                "cwd": null,
                "permissionMode": "default",
                "scheduleName": "daily summary",
                "cron": "0 0 9 * * *",
                "trigger": "scheduled",
            }),
            PublishOptions {
                from: "relay.system.pulse".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let active = run_store.active_run_for_schedule("sched1").await.unwrap();
        assert!(active.is_none());
    }

    struct SlowAgentRuntime;

    #[async_trait]
    impl AgentRuntime for SlowAgentRuntime {
        async fn ensure_session(
            &self,
            _session_id: &str,
            _options: SessionOptions,
        ) -> Result<(), crate::agent_runtime::AgentRuntimeError> {
            Ok(())
        }

        async fn send_message(
            &self,
            _session_id: &str,
            _content: &str,
            _options: SendMessageOptions,
            mut on_event: Box<dyn FnMut(StreamEvent) + Send>,
        ) -> Result<(), crate::agent_runtime::AgentRuntimeError> {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            on_event(StreamEvent::Done);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_pulse_message_aborted_when_budget_ttl_elapses() {
        let (core, _dir) = test_core().await;
        let agent_runtime = Arc::new(SlowAgentRuntime);
        let run_store = Arc::new(InMemoryRunStore::new());
        let run = run_store.create_run("sched1", "scheduled").await.unwrap();

        let receiver = Arc::new(MessageReceiver::new(
            core.clone(),
            agent_runtime.clone(),
            Some(run_store.clone() as Arc<dyn PulseRunStore>),
        ));
        receiver.start().unwrap();

        let mut budget = crate::envelope::Budget::default_at(chrono::Utc::now());
        budget.ttl = chrono::Utc::now().timestamp_millis() + 20;

        core.publish(
            "relay.system.pulse.sched1",
            serde_json::json!({
                "type": "pulse_dispatch",
                "scheduleId": "sched1",
                "runId": run.id,
                "prompt": "summarize today",
                "cwd": null,
                "permissionMode": "default",
                "scheduleName": "daily summary",
                "cron": "0 0 9 * * *",
                "trigger": "scheduled",
            }),
            PublishOptions {
                from: "relay.system.pulse".to_string(),
                budget: Some(budget),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        // The run is no longer active: it resolved to a terminal (failed)
        // state well before the slow agent runtime's 200ms send_message
        // would otherwise have returned, proving the TTL deadline aborted it.
        let active = run_store.active_run_for_schedule("sched1").await.unwrap();
        assert!(active.is_none());
    }

    #[tokio::test]
    async fn test_malformed_pulse_payload_is_dead_lettered_without_invoking_runtime() {
        let (core, _dir) = test_core().await;
        let agent_runtime = Arc::new(EchoAgentRuntime {
            calls: AtomicUsize::new(0),
        });
        let run_store = Arc::new(InMemoryRunStore::new());

        let receiver = Arc::new(MessageReceiver::new(
            core.clone(),
            agent_runtime.clone(),
            Some(run_store.clone() as Arc<dyn PulseRunStore>),
        ));
        receiver.start().unwrap();

        core.publish(
            "relay.system.pulse.sched1",
            serde_json::json!({"not": "a pulse dispatch payload"}),
            PublishOptions {
                from: "relay.system.pulse".to_string(),
                trace_id: Some("malformed-trace".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(agent_runtime.calls.load(Ordering::Relaxed), 0);

        let spans = core.get_trace("malformed-trace").await.unwrap();
        assert!(spans.iter().any(|s| s.status == SpanStatus::DeadLettered));
    }
}
