//! Signal emitter: ephemeral, unpersisted events such as typing
//! indicators, presence, and delivery receipts.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::subject::Subject;

/// An ephemeral event. Never persisted; emitting one must produce no
/// filesystem side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    /// Signal kind, e.g. `"typing"`, `"presence"`, `"delivery_receipt"`.
    pub r#type: String,
    /// Kind-specific state, e.g. `"start"`/`"stop"`.
    pub state: String,
    /// The endpoint subject this signal concerns.
    pub endpoint_subject: String,
    /// Epoch-millisecond timestamp.
    pub timestamp: i64,
    /// Optional opaque payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Signal {
    /// Construct a signal stamped with the current time.
    pub fn new(r#type: impl Into<String>, state: impl Into<String>, endpoint_subject: &Subject, data: Option<serde_json::Value>) -> Self {
        Self {
            r#type: r#type.into(),
            state: state.into(),
            endpoint_subject: endpoint_subject.as_str().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            data,
        }
    }
}

/// A handler invoked synchronously for each matching emission. Returning an
/// error aborts dispatch to any remaining handlers for that emission
/// (first-thrower-wins).
pub type SignalHandler = Arc<dyn Fn(&Signal) -> Result<(), String> + Send + Sync>;

struct Subscriber {
    pattern: Subject,
    handler: SignalHandler,
}

/// Pure in-memory topic dispatcher for [`Signal`]s. No persistence, no I/O.
#[derive(Clone, Default)]
pub struct SignalEmitter {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
}

impl SignalEmitter {
    /// Construct an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for signals whose `endpointSubject` matches
    /// `pattern`.
    pub fn on(&self, pattern: Subject, handler: SignalHandler) {
        self.subscribers.write().push(Subscriber { pattern, handler });
    }

    /// Dispatch `signal` to every matching handler in registration order.
    /// The first handler to return `Err` stops dispatch and its error
    /// propagates to the caller; later handlers for this emission do not
    /// run.
    pub fn emit(&self, signal: &Signal) -> Result<(), String> {
        let Ok(endpoint) = Subject::concrete(signal.endpoint_subject.clone()) else {
            return Ok(());
        };
        let handlers: Vec<SignalHandler> = self
            .subscribers
            .read()
            .iter()
            .filter(|s| s.pattern.matches(&endpoint))
            .map(|s| s.handler.clone())
            .collect();
        for handler in handlers {
            handler(signal)?;
        }
        Ok(())
    }

    /// Remove every registered handler.
    pub fn clear(&self) {
        self.subscribers.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn subj(s: &str) -> Subject {
        Subject::concrete(s).unwrap()
    }

    fn pattern(s: &str) -> Subject {
        Subject::pattern(s).unwrap()
    }

    #[test]
    fn test_emit_dispatches_to_matching_subscriber() {
        let emitter = SignalEmitter::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count2 = count.clone();
        emitter.on(
            pattern("relay.agent.*"),
            Arc::new(move |_s: &Signal| {
                count2.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }),
        );
        let signal = Signal::new("typing", "start", &subj("relay.agent.sess1"), None);
        emitter.emit(&signal).unwrap();
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_emit_does_not_dispatch_to_non_matching_subscriber() {
        let emitter = SignalEmitter::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired2 = fired.clone();
        emitter.on(
            pattern("relay.system.*"),
            Arc::new(move |_s: &Signal| {
                fired2.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }),
        );
        let signal = Signal::new("typing", "start", &subj("relay.agent.sess1"), None);
        emitter.emit(&signal).unwrap();
        assert_eq!(fired.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_first_thrower_wins_stops_later_handlers() {
        let emitter = SignalEmitter::new();
        let second_fired = Arc::new(AtomicUsize::new(0));
        emitter.on(
            pattern("relay.agent.*"),
            Arc::new(|_s: &Signal| Err("boom".to_string())),
        );
        let second_fired2 = second_fired.clone();
        emitter.on(
            pattern("relay.agent.*"),
            Arc::new(move |_s: &Signal| {
                second_fired2.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }),
        );
        let signal = Signal::new("typing", "start", &subj("relay.agent.sess1"), None);
        let err = emitter.emit(&signal).unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(second_fired.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_clear_removes_all_subscribers() {
        let emitter = SignalEmitter::new();
        emitter.on(pattern("relay.agent.*"), Arc::new(|_s: &Signal| Ok(())));
        emitter.clear();
        let signal = Signal::new("typing", "start", &subj("relay.agent.sess1"), None);
        emitter.emit(&signal).unwrap();
    }

    #[test]
    fn test_signal_serializes_camel_case_and_omits_absent_data() {
        let signal = Signal::new("presence", "online", &subj("relay.agent.sess1"), None);
        let v = serde_json::to_value(&signal).unwrap();
        assert!(v.get("endpointSubject").is_some());
        assert!(v.get("data").is_none());
    }
}
