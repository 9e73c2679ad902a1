use async_trait::async_trait;
use serde_json::Value;

/// Failure reported by a [`SpeechTransport`]
///
/// The session only needs the message text (it becomes part of the
/// user-facing failure outcome), so transports flatten their own error
/// taxonomy into this one.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Connection and call surface of the remote inference space
///
/// Implemented by the HTTP adapter in `voxclone-client`; test code
/// substitutes canned implementations so the state machine is exercised
/// without a network.
#[async_trait]
pub trait SpeechTransport: Send + Sync {
    /// Attempt the connection handshake against the space
    async fn probe(&self) -> Result<(), TransportError>;

    /// Invoke a named endpoint with a positional data payload
    ///
    /// Returns the endpoint's output payload, whose shape is not
    /// contractually fixed by the space.
    async fn call(&self, route: &str, data: Vec<Value>) -> Result<Value, TransportError>;
}
