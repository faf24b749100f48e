//! Maildir storage error types.

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Failure modes for [`super::MaildirStore`] operations.
#[derive(Debug, Error)]
pub enum MaildirError {
    /// Filesystem I/O failure at the given path.
    #[error("maildir I/O error at {0}: {1}")]
    Io(String, String),

    /// Envelope/dead-letter (de)serialization failure.
    #[error("maildir serialization error: {0}")]
    Serialization(String),

    /// `claim` lost the rename race or the target file did not exist.
    #[error("claim failed for message {0}")]
    ClaimFailed(String),

    /// `complete`/`fail` called on a message that was never claimed.
    #[error("message {0} was not claimed")]
    NotClaimed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = MaildirError::Io("/tmp/x".to_string(), "permission denied".to_string());
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_claim_failed_display() {
        let err = MaildirError::ClaimFailed("01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string());
        assert!(err.to_string().contains("claim failed"));
    }

    #[test]
    fn test_not_claimed_display() {
        let err = MaildirError::NotClaimed("abc".to_string());
        assert!(err.to_string().contains("not claimed"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MaildirError>();
    }
}
