//! Axum HTTP surface for the console submit/stream protocol and the
//! trace/metrics/dead-letter observability endpoints.

// Layer 1: Standard library imports
use std::convert::Infallible;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::warn;
use ulid::Ulid;

// Layer 3: Internal module imports
use crate::agent_runtime::{AgentRuntime, PermissionMode, SendMessageOptions, SessionOptions, StreamEvent};
use crate::core::{PublishOptions, RelayCore};
use crate::envelope::Envelope;
use crate::error::RelayError;
use crate::maildir::DeadLetter;
use crate::metrics::RelayMetrics;
use crate::registry::endpoint::EndpointRegistryError;

const CLIENT_ID_HEADER: &str = "clientid";

/// A Relay-originated or session-sync event broadcast to console streams,
/// scoped to the `clientId` of the console endpoint it was addressed to.
#[derive(Debug, Clone)]
struct ConsoleEvent {
    client_id: String,
    name: &'static str,
    payload: serde_json::Value,
}

/// Shared state for the router built by [`router`].
#[derive(Clone)]
pub struct AppState {
    core: Arc<RelayCore>,
    agent_runtime: Option<Arc<dyn AgentRuntime>>,
    console_events: broadcast::Sender<ConsoleEvent>,
}

impl AppState {
    /// Construct HTTP state wired to `core`. Subscribes once, for the
    /// process lifetime, to every console endpoint so that publishes
    /// addressed back to a console are fanned out to the matching
    /// `/console/stream` connection(s) as `relay_message` /
    /// `message_delivered` events.
    ///
    /// `agent_runtime` is only consulted when `core.relay_enabled()` is
    /// `false`, to serve console submit directly.
    pub fn new(
        core: Arc<RelayCore>,
        agent_runtime: Option<Arc<dyn AgentRuntime>>,
    ) -> Result<Self, RelayError> {
        let (tx, _rx) = broadcast::channel(1024);
        let forward = tx.clone();
        core.subscribe(
            "relay.human.console.*",
            Arc::new(move |subject: &str, payload: &serde_json::Value, envelope: &Envelope| {
                let Some(client_id) = subject.rsplit('.').next() else {
                    return;
                };
                let client_id = client_id.to_string();
                let _ = forward.send(ConsoleEvent {
                    client_id: client_id.clone(),
                    name: "relay_message",
                    payload: payload.clone(),
                });
                let _ = forward.send(ConsoleEvent {
                    client_id,
                    name: "message_delivered",
                    payload: serde_json::json!({
                        "messageId": envelope.id,
                        "subject": envelope.subject,
                        "status": "delivered",
                    }),
                });
            }),
        )?;
        Ok(Self {
            core,
            agent_runtime,
            console_events: tx,
        })
    }
}

/// Build the console submit/stream, trace, metrics, and dead-letter router.
/// Mount under whatever prefix the host binary chooses.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/console/submit", post(submit))
        .route("/console/stream", get(stream))
        .route("/trace/{id}", get(trace))
        .route("/metrics", get(metrics))
        .route("/dead-letters", get(dead_letters))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConsoleSubmitRequest {
    session_id: String,
    content: String,
    #[serde(default)]
    cwd: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsoleSubmitReceipt {
    message_id: String,
    trace_id: String,
    delivered_count: u32,
}

/// `POST /console/submit`: registers the console endpoint on
/// first use, then either publishes through Relay and returns a receipt, or
/// (when [`RelayCore::relay_enabled`] is `false`) streams the agent
/// runtime's response directly on this request.
async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ConsoleSubmitRequest>,
) -> Result<axum::response::Response, ApiError> {
    let client_id = headers
        .get(CLIENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("missing clientId header"))?
        .to_string();

    let console_subject = format!("relay.human.console.{client_id}");
    match state.core.register_endpoint(&console_subject) {
        Ok(()) => {}
        Err(RelayError::EndpointRegistry(EndpointRegistryError::AlreadyRegistered(_))) => {}
        Err(err) => return Err(err.into()),
    }

    if !state.core.relay_enabled() {
        return submit_direct(state, req).await.map(IntoResponse::into_response);
    }

    let trace_id = Ulid::new().to_string();
    let payload = serde_json::json!({
        "content": req.content,
        "platformData": {
            "cwd": req.cwd,
            "sessionId": req.session_id,
            "clientId": client_id,
            "traceId": trace_id,
        }
    });

    let outcome = state
        .core
        .publish(
            &format!("relay.agent.{}", req.session_id),
            payload,
            PublishOptions {
                from: console_subject.clone(),
                reply_to: Some(console_subject),
                trace_id: Some(trace_id.clone()),
                ..Default::default()
            },
        )
        .await?;

    let _ = state.console_events.send(ConsoleEvent {
        client_id,
        name: "relay_receipt",
        payload: serde_json::json!({"messageId": outcome.message_id, "traceId": trace_id}),
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(ConsoleSubmitReceipt {
            message_id: outcome.message_id,
            trace_id,
            delivered_count: outcome.delivered_to,
        }),
    )
        .into_response())
}

/// Legacy direct-call fallback: skips the Relay publish pipeline
/// entirely and streams [`StreamEvent`]s from the agent runtime back on the
/// same request as a single-shot SSE body.
async fn submit_direct(
    state: AppState,
    req: ConsoleSubmitRequest,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let runtime = state
        .agent_runtime
        .clone()
        .ok_or_else(|| ApiError::service_unavailable("no agent runtime configured"))?;

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<StreamEvent>();
    let session_id = req.session_id;
    let content = req.content;
    let cwd = req.cwd;

    tokio::spawn(async move {
        if let Err(err) = runtime
            .ensure_session(
                &session_id,
                SessionOptions {
                    cwd,
                    permission_mode: PermissionMode::Default,
                },
            )
            .await
        {
            let _ = tx.send(StreamEvent::Error {
                message: err.to_string(),
            });
            return;
        }

        let forward = tx.clone();
        let result = runtime
            .send_message(
                &session_id,
                &content,
                SendMessageOptions::default(),
                Box::new(move |event| {
                    let _ = forward.send(event);
                }),
            )
            .await;

        if let Err(err) = result {
            let _ = tx.send(StreamEvent::Error {
                message: err.to_string(),
            });
        }
    });

    let stream = tokio_stream::wrappers::UnboundedReceiverStream::new(rx).map(|event| {
        let name = stream_event_name(&event);
        let data = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
        Ok(Event::default().event(name).data(data))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn stream_event_name(event: &StreamEvent) -> &'static str {
    match event {
        StreamEvent::TextDelta { .. } => "text_delta",
        StreamEvent::ToolCallStart { .. } => "tool_call_start",
        StreamEvent::ToolCallResult { .. } => "tool_call_result",
        StreamEvent::Done => "done",
        StreamEvent::Error { .. } => "error",
    }
}

#[derive(Debug, Deserialize)]
struct StreamQuery {
    #[serde(rename = "clientId")]
    client_id: String,
}

/// `GET /console/stream?clientId=...`: a long-lived SSE connection
/// carrying every `relay_message` / `relay_receipt` / `message_delivered`
/// event addressed to this console's endpoint.
async fn stream(
    State(state): State<AppState>,
    Query(params): Query<StreamQuery>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let client_id = params.client_id;
    let rx = state.console_events.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(move |item| match item {
        Ok(event) if event.client_id == client_id => Some(Ok(Event::default()
            .event(event.name)
            .data(event.payload.to_string()))),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "console stream receiver lagged, dropping events");
            None
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceResponse {
    trace_id: String,
    spans: Vec<crate::store::trace::TraceSpan>,
}

/// `GET /trace/{id}`: `id` is a `messageId`. `404` if unknown.
async fn trace(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Json<TraceResponse>, ApiError> {
    match state.core.get_trace_by_message(&message_id).await? {
        Some((trace_id, spans)) => Ok(Json(TraceResponse { trace_id, spans })),
        None => Err(ApiError::not_found("unknown trace")),
    }
}

/// `GET /metrics`: the combined [`RelayMetrics`] snapshot.
async fn metrics(State(state): State<AppState>) -> Result<Json<RelayMetrics>, ApiError> {
    Ok(Json(state.core.get_metrics().await?))
}

#[derive(Debug, Deserialize)]
struct DeadLettersQuery {
    #[serde(rename = "endpointHash")]
    endpoint_hash: Option<String>,
}

/// `GET /dead-letters?endpointHash=...`.
async fn dead_letters(
    State(state): State<AppState>,
    Query(params): Query<DeadLettersQuery>,
) -> Result<Json<Vec<DeadLetter>>, ApiError> {
    Ok(Json(
        state.core.get_dead_letters(params.endpoint_hash.as_deref())?,
    ))
}

/// Error envelope for the HTTP surface: maps [`RelayError`] onto a status
/// code and a `{ "error": "..." }` body.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let status = match &err {
            RelayError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            RelayError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            RelayError::Closed => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::InvalidInput(_) | RelayError::Subject(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}
