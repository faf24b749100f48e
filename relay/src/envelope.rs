//! Envelopes and their delivery budget.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

// Layer 3: Internal module imports
use crate::subject::Subject;

/// Default max hop count for a freshly constructed budget.
pub const DEFAULT_MAX_HOPS: u32 = 5;
/// Default call budget for a freshly constructed budget.
pub const DEFAULT_CALL_BUDGET: u32 = 10;
/// Default TTL horizon, in milliseconds, from "now".
pub const DEFAULT_TTL_MS: i64 = 60 * 60 * 1000;

/// Delivery safety limits carried on every envelope.
///
/// Budgets are treated as immutable by senders: a republish always starts
/// from the *current* envelope's budget and calls [`Budget::advance`],
/// never mutates fields directly in place after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Number of successful hops so far.
    pub hop_count: u32,
    /// Rejection threshold for `hop_count`.
    pub max_hops: u32,
    /// Subjects already visited, in delivery order.
    pub ancestor_chain: Vec<String>,
    /// Absolute epoch-millisecond deadline.
    pub ttl: i64,
    /// Remaining permitted agent-runtime calls.
    pub call_budget_remaining: u32,
}

impl Budget {
    /// `createDefaultBudget(overrides?)`: a sensible starting budget.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        Self {
            hop_count: 0,
            max_hops: DEFAULT_MAX_HOPS,
            ancestor_chain: Vec::new(),
            ttl: now.timestamp_millis() + DEFAULT_TTL_MS,
            call_budget_remaining: DEFAULT_CALL_BUDGET,
        }
    }

    /// Produce the budget carried forward to the next hop:
    /// hop incremented, ancestor appended, call budget decremented. `ttl`
    /// and `max_hops` are never changed by this or any other operation.
    /// The original is left untouched.
    pub fn advance(&self, visited: &Subject) -> Self {
        let mut ancestor_chain = self.ancestor_chain.clone();
        ancestor_chain.push(visited.as_str().to_string());
        Self {
            hop_count: self.hop_count + 1,
            max_hops: self.max_hops,
            ancestor_chain,
            ttl: self.ttl,
            call_budget_remaining: self.call_budget_remaining.saturating_sub(1),
        }
    }
}

/// Reason a [`Budget`] was rejected by the [`check_budget`] gate: each variant carries both the human-facing reason and a
/// fixed metric tag so the two downstream consumers stay in lockstep.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BudgetRejection {
    /// `hopCount >= maxHops`.
    #[error("max hops exceeded ({hop_count}/{max_hops})")]
    HopLimitExceeded {
        /// Current hop count.
        hop_count: u32,
        /// Configured maximum.
        max_hops: u32,
    },

    /// The target subject already appears in the ancestor chain.
    #[error("cycle detected: {subject} already in chain")]
    CycleDetected {
        /// The subject that would form a cycle.
        subject: String,
    },

    /// `now > ttl`.
    #[error("message expired (TTL)")]
    TtlExpired,

    /// `callBudgetRemaining == 0`.
    #[error("call budget exhausted")]
    BudgetExhausted,
}

impl BudgetRejection {
    /// Fixed substring used for trace-span `error` aggregation, distinct from the human-facing `Display` text.
    pub fn metric_tag(&self) -> &'static str {
        match self {
            Self::HopLimitExceeded { .. } => "hop_limit_exceeded",
            Self::CycleDetected { .. } => "cycle_detected",
            Self::TtlExpired => "ttl_expired",
            Self::BudgetExhausted => "budget_exhausted",
        }
    }
}

/// Enforce the budget check ordering contract: hop → cycle → TTL →
/// budget. On success, returns the advanced budget to deliver downstream.
pub fn check_budget(
    budget: &Budget,
    target: &Subject,
    now: DateTime<Utc>,
) -> Result<Budget, BudgetRejection> {
    if budget.hop_count >= budget.max_hops {
        return Err(BudgetRejection::HopLimitExceeded {
            hop_count: budget.hop_count,
            max_hops: budget.max_hops,
        });
    }
    if budget
        .ancestor_chain
        .iter()
        .any(|s| s == target.as_str())
    {
        return Err(BudgetRejection::CycleDetected {
            subject: target.as_str().to_string(),
        });
    }
    if now.timestamp_millis() > budget.ttl {
        return Err(BudgetRejection::TtlExpired);
    }
    if budget.call_budget_remaining == 0 {
        return Err(BudgetRejection::BudgetExhausted);
    }
    Ok(budget.advance(target))
}

/// A published message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Monotonic, lexicographically sortable identifier (ULID, 26 chars).
    pub id: String,
    /// Target subject; always concrete.
    pub subject: String,
    /// Sender subject.
    pub from: String,
    /// Optional subject for responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Delivery safety limits.
    pub budget: Budget,
    /// ISO-8601 creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Opaque JSON payload.
    pub payload: serde_json::Value,
}

impl Envelope {
    /// Construct a new envelope with a fresh ULID id and `createdAt=now`.
    pub fn new(
        subject: &Subject,
        from: &Subject,
        reply_to: Option<&Subject>,
        budget: Budget,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: Ulid::new().to_string(),
            subject: subject.as_str().to_string(),
            from: from.as_str().to_string(),
            reply_to: reply_to.map(|s| s.as_str().to_string()),
            budget,
            created_at: Utc::now(),
            payload,
        }
    }

    /// Parse `subject` back into a validated [`Subject`].
    pub fn subject(&self) -> Result<Subject, crate::subject::SubjectError> {
        Subject::concrete(self.subject.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subj(s: &str) -> Subject {
        Subject::concrete(s).unwrap()
    }

    #[test]
    fn test_default_budget_fields() {
        let now = Utc::now();
        let budget = Budget::default_at(now);
        assert_eq!(budget.hop_count, 0);
        assert_eq!(budget.max_hops, DEFAULT_MAX_HOPS);
        assert!(budget.ancestor_chain.is_empty());
        assert_eq!(budget.call_budget_remaining, DEFAULT_CALL_BUDGET);
        assert!(budget.ttl > now.timestamp_millis());
    }

    #[test]
    fn test_advance_increments_hop_and_appends_ancestor() {
        let now = Utc::now();
        let budget = Budget::default_at(now);
        let advanced = budget.advance(&subj("relay.agent.sess1"));
        assert_eq!(advanced.hop_count, 1);
        assert_eq!(advanced.ancestor_chain, vec!["relay.agent.sess1".to_string()]);
        assert_eq!(advanced.call_budget_remaining, DEFAULT_CALL_BUDGET - 1);
        // original untouched
        assert_eq!(budget.hop_count, 0);
        assert!(budget.ancestor_chain.is_empty());
    }

    #[test]
    fn test_check_budget_hop_limit() {
        let now = Utc::now();
        let mut budget = Budget::default_at(now);
        budget.hop_count = budget.max_hops;
        let err = check_budget(&budget, &subj("relay.agent.a"), now).unwrap_err();
        assert!(matches!(err, BudgetRejection::HopLimitExceeded { .. }));
        assert_eq!(err.metric_tag(), "hop_limit_exceeded");
    }

    #[test]
    fn test_check_budget_boundary_hop_count_one_below_max_allowed() {
        let now = Utc::now();
        let mut budget = Budget::default_at(now);
        budget.hop_count = budget.max_hops - 1;
        assert!(check_budget(&budget, &subj("relay.agent.a"), now).is_ok());
    }

    #[test]
    fn test_check_budget_cycle_detected() {
        let now = Utc::now();
        let mut budget = Budget::default_at(now);
        budget.ancestor_chain.push("relay.agent.a".to_string());
        let err = check_budget(&budget, &subj("relay.agent.a"), now).unwrap_err();
        assert!(matches!(err, BudgetRejection::CycleDetected { .. }));
        assert_eq!(err.metric_tag(), "cycle_detected");
    }

    #[test]
    fn test_check_budget_ttl_boundary_equal_is_allowed() {
        let now = Utc::now();
        let mut budget = Budget::default_at(now);
        budget.ttl = now.timestamp_millis();
        assert!(check_budget(&budget, &subj("relay.agent.a"), now).is_ok());
    }

    #[test]
    fn test_check_budget_ttl_one_ms_earlier_rejected() {
        let now = Utc::now();
        let mut budget = Budget::default_at(now);
        budget.ttl = now.timestamp_millis() - 1;
        let err = check_budget(&budget, &subj("relay.agent.a"), now).unwrap_err();
        assert_eq!(err, BudgetRejection::TtlExpired);
        assert_eq!(err.metric_tag(), "ttl_expired");
    }

    #[test]
    fn test_check_budget_exhausted() {
        let now = Utc::now();
        let mut budget = Budget::default_at(now);
        budget.call_budget_remaining = 0;
        let err = check_budget(&budget, &subj("relay.agent.a"), now).unwrap_err();
        assert_eq!(err, BudgetRejection::BudgetExhausted);
        assert_eq!(err.metric_tag(), "budget_exhausted");
    }

    #[test]
    fn test_check_ordering_hop_before_cycle() {
        // Both hop-limit and cycle conditions hold; hop must win.
        let now = Utc::now();
        let mut budget = Budget::default_at(now);
        budget.hop_count = budget.max_hops;
        budget.ancestor_chain.push("relay.agent.a".to_string());
        let err = check_budget(&budget, &subj("relay.agent.a"), now).unwrap_err();
        assert!(matches!(err, BudgetRejection::HopLimitExceeded { .. }));
    }

    #[test]
    fn test_envelope_ids_are_monotonic() {
        let s = subj("relay.agent.sess1");
        let budget = Budget::default_at(Utc::now());
        let e1 = Envelope::new(&s, &s, None, budget.clone(), serde_json::Value::Null);
        let e2 = Envelope::new(&s, &s, None, budget, serde_json::Value::Null);
        assert!(e1.id < e2.id);
    }

    #[test]
    fn test_envelope_reply_to_serialization_omits_when_none() {
        let s = subj("relay.agent.sess1");
        let budget = Budget::default_at(Utc::now());
        let e = Envelope::new(&s, &s, None, budget, serde_json::json!({"k":"v"}));
        let v = serde_json::to_value(&e).unwrap();
        assert!(v.get("replyTo").is_none());
    }
}
