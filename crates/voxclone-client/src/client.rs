use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;
use voxclone_config::SpaceConfig;
use voxclone_core::{SpeechTransport, TransportError};

use crate::error::{ClientError, Result};
use crate::http_client::http_client;
use crate::space::resolve_base_url;

/// Ceiling for the readiness handshake; probes should fail fast
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one hosted inference space
///
/// Speaks the Gradio HTTP API: a `GET /config` handshake, then the
/// two-step call protocol (`POST /call/{fn}` returning an event id,
/// followed by an SSE stream carrying the run's result).
#[derive(Clone)]
pub struct SpaceClient {
    http: Client,
    base_url: Url,
    auth_token: Option<SecretString>,
    call_timeout: Duration,
}

/// Initiation response of the call protocol
#[derive(Deserialize)]
struct CallHandle {
    event_id: String,
}

impl SpaceClient {
    /// Build a client from configuration without touching the network
    pub fn new(config: &SpaceConfig) -> Result<Self> {
        let base_url = resolve_base_url(&config.address)?;

        Ok(Self {
            http: http_client(),
            base_url,
            auth_token: config.auth_token().cloned(),
            call_timeout: config.call_timeout(),
        })
    }

    /// Base URL of the space's API
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Readiness handshake against the space's config endpoint
    ///
    /// Success only establishes that the space is awake and serving; the
    /// returned document is not inspected.
    pub async fn handshake(&self) -> Result<()> {
        let url = self.endpoint_url("config")?;

        let response = self
            .authorize(self.http.get(url))
            .timeout(HANDSHAKE_TIMEOUT)
            .send()
            .await?;

        if response.status().is_success() {
            tracing::debug!(space = %self.base_url, "space handshake succeeded");
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// Invoke an endpoint with a positional data payload
    ///
    /// Initiates the run, then follows its event stream until a
    /// `complete` or `error` event arrives. Both requests carry the
    /// configured call timeout.
    pub async fn call_endpoint(&self, route: &str, data: Vec<Value>) -> Result<Value> {
        let handle = self.initiate(route, data).await?;

        tracing::debug!(route, event_id = %handle.event_id, "following space event stream");

        self.await_result(route, &handle.event_id).await
    }

    /// Fetch generated audio bytes from a URL the space returned
    ///
    /// The bearer token is only attached when the URL points back at the
    /// space itself; the response shape is not contractually fixed, and
    /// an off-origin URL must not receive the credential.
    pub async fn fetch_audio(&self, url: &str) -> Result<Bytes> {
        let url = Url::parse(url).map_err(|e| ClientError::Parse(format!("invalid audio URL: {e}")))?;

        let request = if self.same_origin(&url) {
            self.authorize(self.http.get(url))
        } else {
            self.http.get(url)
        };

        let response = request.timeout(self.call_timeout).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.bytes().await?)
    }

    async fn initiate(&self, route: &str, data: Vec<Value>) -> Result<CallHandle> {
        let url = self.endpoint_url(&format!("call{route}"))?;

        let response = self
            .authorize(self.http.post(url))
            .timeout(self.call_timeout)
            .json(&json!({ "data": data }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response
            .json::<CallHandle>()
            .await
            .map_err(|e| ClientError::Parse(format!("malformed call initiation response: {e}")))
    }

    async fn await_result(&self, route: &str, event_id: &str) -> Result<Value> {
        let url = self.endpoint_url(&format!("call{route}/{event_id}"))?;

        let response = self
            .authorize(self.http.get(url))
            .timeout(self.call_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let mut events = response.bytes_stream().eventsource();

        while let Some(event) = events.next().await {
            let event = event.map_err(|e| ClientError::Parse(format!("event stream error: {e}")))?;

            match event.event.as_str() {
                "complete" => {
                    return serde_json::from_str(&event.data)
                        .map_err(|e| ClientError::Parse(format!("malformed result payload: {e}")));
                }
                "error" => return Err(ClientError::Endpoint(event.data)),
                // heartbeat / generating events carry no result
                _ => {}
            }
        }

        Err(ClientError::Parse("event stream ended without a result".to_owned()))
    }

    fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid endpoint path `{path}`: {e}")))
    }

    /// Whether a URL points at the same host and port as the space
    fn same_origin(&self, url: &Url) -> bool {
        url.host_str() == self.base_url.host_str()
            && url.port_or_known_default() == self.base_url.port_or_known_default()
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token.expose_secret())),
            None => request,
        }
    }
}

/// Map a non-success response to the client error taxonomy
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_owned());

    tracing::debug!("space API error ({status}): {message}");

    match status.as_u16() {
        401 | 403 => ClientError::AuthenticationFailed(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}


#[async_trait]
impl SpeechTransport for SpaceClient {
    async fn probe(&self) -> std::result::Result<(), TransportError> {
        self.handshake().await.map_err(Into::into)
    }

    async fn call(&self, route: &str, data: Vec<Value>) -> std::result::Result<Value, TransportError> {
        self.call_endpoint(route, data).await.map_err(Into::into)
    }
}
