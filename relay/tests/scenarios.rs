//! End-to-end scenario tests covering cross-module delivery paths.
//!
//! Unlike the unit tests embedded in each module, these exercise
//! `RelayCore` together with its downstream bridges (`MessageReceiver`,
//! `Scheduler`) the way a real process wires them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use relay::prelude::*;
use relay::{
    AgentRuntimeError, DispatchOutcome, InMemoryRunStore, PermissionMode, PulseRunStore,
    ScheduleStatus, SendMessageOptions, SessionOptions, SpanStatus, StreamEvent,
};
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
    ) -> Result<(), AgentRuntimeError> {
        Ok(())
    }

    async fn send_message(
        &self,
        _session_id: &str,
        content: &str,
        _options: SendMessageOptions,
        mut on_event: Box<dyn FnMut(StreamEvent) + Send>,
    ) -> Result<(), AgentRuntimeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        on_event(StreamEvent::TextDelta {
            text: format!("reply: {content}"),
        });
        on_event(StreamEvent::Done);
        Ok(())
    }
}

async fn test_core() -> (Arc<RelayCore>, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let config = RelayConfig::builder()
        .with_data_dir(dir.path())
        .build()
        .expect("valid config");
    (
        Arc::new(RelayCore::new(config).await.expect("core opens")),
        dir,
    )
}

/// S1: end-to-end console chat. A console client publishes to
/// `relay.agent.sess1` with `replyTo` set to its own subject; the message
/// receiver bridges the agent runtime's reply back onto the console's
/// mailbox, and the whole round trip shares one trace.
#[tokio::test]
async fn s1_end_to_end_console_chat() {
    let (core, _dir) = test_core().await;
    core.register_endpoint("relay.human.console.c1").unwrap();

    let agent_runtime = Arc::new(EchoAgentRuntime {
        calls: AtomicUsize::new(0),
    });
    let receiver = Arc::new(MessageReceiver::new(core.clone(), agent_runtime.clone(), None));
    receiver.start().unwrap();

    let outcome = core
        .publish(
            "relay.agent.sess1",
            serde_json::json!({
                "content": "hi",
                "platformData": {
                    "cwd": "/proj",
                    "sessionId": "sess1",
                    "clientId": "c1",
                    "traceId": "t1",
                },
            }),
            PublishOptions {
                from: "relay.human.console.c1".to_string(),
                reply_to: Some("relay.human.console.c1".to_string()),
                budget: None,
                trace_id: Some("t1".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.delivered_to, 0, "relay.agent.sess1 has no registered endpoint yet");

    // The agent subject itself need not be a registered endpoint for the
    // subscription bridge to see it -- subscriptions dispatch independent
    // of endpoint fan-out -- but the receiver still needs to run before we
    // assert on its side effects.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(agent_runtime.calls.load(Ordering::Relaxed), 1);

    let spans = core.get_trace("t1").await.unwrap();
    assert!(!spans.is_empty());
    assert_eq!(spans[0].to_endpoint, "relay.agent.sess1".to_string());

    // The receiver republished the streamed reply back onto the console's
    // own registered mailbox; the index reflects at least that delivery.
    let metrics = core.get_metrics().await.unwrap();
    assert!(metrics.index.total_messages >= 1);
}

/// S2: a Pulse dispatch with no receiver registered reports
/// `deliveredTo==0`, so the scheduler marks the run failed with
/// `"No Relay receiver for Pulse dispatch"` instead of leaving it active.
#[tokio::test]
async fn s2_pulse_dispatch_with_no_receiver() {
    let (core, _dir) = test_core().await;

    let run_store = Arc::new(InMemoryRunStore::new());
    let scheduler = Scheduler::new_relay_mode(run_store.clone(), core.clone(), 10);
    scheduler
        .upsert_schedule(ScheduleDefinition {
            id: "sched-abc".to_string(),
            name: "no receiver".to_string(),
            prompt: "do the thing".to_string(),
            cron: "0 0 * * * *".to_string(),
            cwd: None,
            enabled: true,
            max_runtime_ms: None,
            permission_mode: PermissionMode::Default,
            status: ScheduleStatus::Active,
        })
        .unwrap();

    let outcome = scheduler.dispatch_tick("sched-abc").await.unwrap();
    assert!(matches!(outcome, DispatchOutcome::NoRelayReceiver));

    let run = run_store
        .active_run_for_schedule("sched-abc")
        .await
        .unwrap();
    assert!(run.is_none(), "the failed run is no longer active");

    // RelayCore itself also dead-letters the publish: no registered
    // endpoint and no matching subscriber means the envelope has nowhere
    // to go, independent of the scheduler marking its run failed.
    let target = Subject::concrete("relay.system.pulse.sched-abc").unwrap();
    let hash = endpoint_hash(&target);
    let dead_letters = core.get_dead_letters(Some(&hash)).unwrap();
    assert_eq!(dead_letters.len(), 1);
    assert!(dead_letters[0].reason.contains("no_matching_endpoint"));

    let (_, spans) = core
        .get_trace_by_message(&dead_letters[0].envelope.id)
        .await
        .unwrap()
        .expect("dead-lettered publish has a trace span");
    assert!(spans.iter().any(|s| s.status == SpanStatus::DeadLettered
        && s.error.as_deref().is_some_and(|e| e.contains("no_matching_endpoint"))));
}
