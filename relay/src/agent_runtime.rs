//! The external agent runtime contract Relay bridges to.
//!
//! This module defines only the collaborator boundary: Relay never spawns
//! or owns agent processes itself, it calls through this trait. A concrete
//! implementation lives outside this crate.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure modes surfaced by an [`AgentRuntime`] implementation.
#[derive(Debug, Error)]
pub enum AgentRuntimeError {
    /// `ensureSession` could not establish or resume the session.
    #[error("failed to ensure session {session_id}: {reason}")]
    SessionUnavailable {
        /// The session id that failed.
        session_id: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// `sendMessage` failed before or during streaming.
    #[error("agent runtime call failed: {0}")]
    CallFailed(String),

    /// The runtime call was cancelled via its cancellation token.
    #[error("agent runtime call cancelled")]
    Cancelled,
}

/// Permission mode forwarded from `envelope.payload.platformData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionMode {
    /// Every tool call requires interactive approval.
    Default,
    /// Tool calls are approved automatically.
    AcceptEdits,
    /// No sandboxing; full autonomy.
    BypassPermissions,
}

/// Options passed to [`AgentRuntime::ensure_session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    /// Working directory for the session, if any.
    pub cwd: Option<String>,
    /// Permission mode to apply for tool calls.
    pub permission_mode: PermissionMode,
}

/// Options passed to [`AgentRuntime::send_message`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageOptions {
    /// Optional cooperative cancellation token: when set, the runtime stops emitting further events once
    /// observed.
    #[serde(skip)]
    pub cancellation: Option<Arc<tokio::sync::Notify>>,
}

/// One event in the lazy, finite stream produced by
/// [`AgentRuntime::send_message`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// An incremental chunk of assistant text.
    TextDelta {
        /// The text chunk.
        text: String,
    },
    /// The start of a tool invocation.
    ToolCallStart {
        /// The tool's name.
        tool_name: String,
        /// The tool call's id, for correlating with its result.
        call_id: String,
    },
    /// The result of a tool invocation.
    ToolCallResult {
        /// The originating call id.
        call_id: String,
        /// Opaque result payload.
        result: serde_json::Value,
    },
    /// The stream has finished successfully.
    Done,
    /// The stream ended in error.
    Error {
        /// Human-readable failure reason.
        message: String,
    },
}

/// The contract an external agent runtime must satisfy for
/// [`crate::receiver::MessageReceiver`] to bridge Relay traffic into it.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Ensure a session exists (creating or resuming it) before streaming.
    async fn ensure_session(
        &self,
        session_id: &str,
        options: SessionOptions,
    ) -> Result<(), AgentRuntimeError>;

    /// Send `content` to `session_id`, invoking `on_event` for each
    /// [`StreamEvent`] as it arrives. Returns once the stream has
    /// completed (`Done`) or failed (`Error`).
    async fn send_message(
        &self,
        session_id: &str,
        content: &str,
        options: SendMessageOptions,
        on_event: Box<dyn FnMut(StreamEvent) + Send>,
    ) -> Result<(), AgentRuntimeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_event_serializes_tagged() {
        let event = StreamEvent::TextDelta {
            text: "hello".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"text_delta\""));
    }

    #[test]
    fn test_session_options_default_permission_mode_round_trips() {
        let opts = SessionOptions {
            cwd: Some("/proj".to_string()),
            permission_mode: PermissionMode::AcceptEdits,
        };
        let json = serde_json::to_string(&opts).unwrap();
        let back: SessionOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cwd, opts.cwd);
        assert_eq!(back.permission_mode, PermissionMode::AcceptEdits);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AgentRuntimeError>();
    }
}
