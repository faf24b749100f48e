//! Top-level error taxonomy for the Relay bus.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::access::AccessControlError;
use crate::adapter::AdapterError;
use crate::maildir::MaildirError;
use crate::registry::endpoint::EndpointRegistryError;
use crate::registry::subscription::SubscriptionError;
use crate::store::{IndexError, TraceStoreError};
use crate::subject::SubjectError;

/// Closed taxonomy of Relay failure kinds.
///
/// Every publish-path rejection and every component-level failure folds into
/// one of these variants via `#[from]`, so callers can match on a single
/// error type regardless of which subsystem raised it.
#[derive(Debug, Error)]
pub enum RelayError {
    /// `accessControl.checkAccess` denied the publish outright.
    #[error("access denied: {from} -> {to}")]
    AccessDenied {
        /// Sender subject.
        from: String,
        /// Target subject.
        to: String,
    },

    /// The sender exceeded its sliding-window rate limit.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Relay core has been closed; no further operations are accepted.
    #[error("relay core has been closed")]
    Closed,

    /// A subject, pattern, payload, or configuration value failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Subject parsing/matching failure.
    #[error("subject error: {0}")]
    Subject(#[from] SubjectError),

    /// Maildir storage failure.
    #[error("maildir error: {0}")]
    Maildir(#[from] MaildirError),

    /// Secondary index failure.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// Trace store failure.
    #[error("trace store error: {0}")]
    Trace(#[from] TraceStoreError),

    /// Access-control rule file failure.
    #[error("access control error: {0}")]
    AccessControl(#[from] AccessControlError),

    /// Adapter lifecycle or delivery failure.
    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Endpoint registration/lookup failure.
    #[error("endpoint registry error: {0}")]
    EndpointRegistry(#[from] EndpointRegistryError),

    /// Subscription pattern failure.
    #[error("subscription error: {0}")]
    Subscription(#[from] SubscriptionError),

    /// A subscriber handler raised an exception while processing a delivery.
    #[error("handler exception for endpoint {endpoint_hash}: {reason}")]
    HandlerException {
        /// Endpoint hash the handler was registered against.
        endpoint_hash: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// Configuration failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RelayError {
    /// Process-wide failures abort the whole publish.
    pub fn aborts_publish(&self) -> bool {
        matches!(
            self,
            RelayError::AccessDenied { .. }
                | RelayError::RateLimited(_)
                | RelayError::Closed
                | RelayError::InvalidInput(_)
        )
    }

    /// Per-endpoint rejections accumulate into the publish result instead of
    /// aborting delivery to the remaining endpoints.
    pub fn is_per_endpoint(&self) -> bool {
        !self.aborts_publish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_display() {
        let err = RelayError::AccessDenied {
            from: "relay.human.console.c1".to_string(),
            to: "relay.agent.sess1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("access denied"));
        assert!(msg.contains("relay.human.console.c1"));
        assert!(msg.contains("relay.agent.sess1"));
    }

    #[test]
    fn test_rate_limited_display() {
        let err = RelayError::RateLimited("rate limit exceeded: 10/10 messages in 60s window".to_string());
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_closed_display() {
        assert_eq!(
            RelayError::Closed.to_string(),
            "relay core has been closed"
        );
    }

    #[test]
    fn test_aborts_publish_classification() {
        assert!(RelayError::Closed.aborts_publish());
        assert!(RelayError::InvalidInput("bad".into()).aborts_publish());
        assert!(!RelayError::HandlerException {
            endpoint_hash: "abc123def456".into(),
            reason: "boom".into(),
        }
        .aborts_publish());
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RelayError>();
    }
}
