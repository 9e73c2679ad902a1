//! Mock inference space for integration tests
//!
//! Implements the minimal Gradio API surface the client consumes: the
//! `/config` handshake and the two-step `/call/generate_speech` protocol
//! with an SSE result stream.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use voxclone_config::SpaceConfig;

/// How the mock answers a generation run
enum RunResult {
    /// SSE `complete` event carrying this payload
    Complete(Value),
    /// SSE `error` event with this message
    EndpointError(String),
    /// Call initiation fails outright with HTTP 500
    Unavailable,
}

struct MockSpaceState {
    result: RunResult,
    /// Bearer token the handshake and calls must present, if any
    required_token: Option<String>,
    call_count: AtomicU32,
}

/// A running mock space instance
pub struct MockSpace {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSpaceState>,
}

impl MockSpace {
    /// Start a mock whose generation run completes with the given payload
    pub async fn start(payload: Value) -> anyhow::Result<Self> {
        Self::start_inner(RunResult::Complete(payload), None).await
    }

    /// Start a mock whose generation run reports an endpoint error
    pub async fn start_endpoint_error(message: &str) -> anyhow::Result<Self> {
        Self::start_inner(RunResult::EndpointError(message.to_owned()), None).await
    }

    /// Start a mock that rejects call initiation with HTTP 500
    pub async fn start_unavailable() -> anyhow::Result<Self> {
        Self::start_inner(RunResult::Unavailable, None).await
    }

    /// Start a mock that requires a bearer token on every request
    pub async fn start_requiring_token(token: &str, payload: Value) -> anyhow::Result<Self> {
        Self::start_inner(RunResult::Complete(payload), Some(token.to_owned())).await
    }

    async fn start_inner(result: RunResult, required_token: Option<String>) -> anyhow::Result<Self> {
        let state = Arc::new(MockSpaceState {
            result,
            required_token,
            call_count: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/config", routing::get(handle_config))
            .route("/call/generate_speech", routing::post(handle_call))
            .route("/call/generate_speech/{event_id}", routing::get(handle_events))
            .route("/file/{name}", routing::get(handle_file))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Space configuration pointing at this mock
    pub fn space_config(&self) -> SpaceConfig {
        SpaceConfig {
            address: format!("http://{}", self.addr),
            auth_token: None,
            call_timeout_seconds: 5,
        }
    }

    /// Space configuration carrying the given bearer token
    pub fn space_config_with_token(&self, token: &str) -> SpaceConfig {
        SpaceConfig {
            auth_token: Some(token.to_owned().into()),
            ..self.space_config()
        }
    }

    /// Number of generation runs initiated against this mock
    pub fn call_count(&self) -> u32 {
        self.state.call_count.load(Ordering::SeqCst)
    }

    /// URL of the canned audio file this mock serves
    pub fn file_url(&self) -> String {
        format!("http://{}/file/output.wav", self.addr)
    }
}

impl Drop for MockSpace {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn authorized(state: &MockSpaceState, headers: &HeaderMap) -> bool {
    state.required_token.as_ref().is_none_or(|token| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == format!("Bearer {token}"))
    })
}

async fn handle_config(State(state): State<Arc<MockSpaceState>>, headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid token"}))).into_response();
    }

    Json(json!({"version": "4.44.1", "mode": "blocks"})).into_response()
}

async fn handle_call(State(state): State<Arc<MockSpaceState>>, headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&state, &headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid token"}))).into_response();
    }

    state.call_count.fetch_add(1, Ordering::SeqCst);

    if matches!(state.result, RunResult::Unavailable) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "worker crashed").into_response();
    }

    Json(json!({"event_id": "ev-test-1"})).into_response()
}

/// Serve canned audio, rejecting credentials a client should not have sent
///
/// A mock without a required token stands in for a third-party host; a
/// bearer header arriving there is a credential leak, answered with 403.
async fn handle_file(State(state): State<Arc<MockSpaceState>>, headers: HeaderMap) -> impl IntoResponse {
    if state.required_token.is_none() && headers.contains_key(header::AUTHORIZATION) {
        return (StatusCode::FORBIDDEN, "unexpected credentials").into_response();
    }

    if !authorized(&state, &headers) {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    }

    ([(header::CONTENT_TYPE, "audio/wav")], b"RIFFfakewav".to_vec()).into_response()
}

async fn handle_events(
    State(state): State<Arc<MockSpaceState>>,
    Path(event_id): Path<String>,
) -> impl IntoResponse {
    assert_eq!(event_id, "ev-test-1");

    // Leading heartbeat exercises the client's event filtering
    let body = match &state.result {
        RunResult::Complete(payload) => {
            format!("event: heartbeat\ndata: null\n\nevent: complete\ndata: {payload}\n\n")
        }
        RunResult::EndpointError(message) => format!("event: error\ndata: {message}\n\n"),
        RunResult::Unavailable => String::new(),
    };

    ([(header::CONTENT_TYPE, "text/event-stream")], body)
}
