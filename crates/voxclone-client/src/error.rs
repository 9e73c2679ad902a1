use voxclone_core::TransportError;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from the space client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never reached the space or timed out
    #[error("failed to reach the space: {0}")]
    Connection(String),

    /// The space rejected the configured credentials
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The space answered with a non-success status
    #[error("space API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Body text returned by the space
        message: String,
    },

    /// The endpoint reported a failed run
    #[error("generation failed on the space: {0}")]
    Endpoint(String),

    /// A response could not be decoded
    #[error("failed to parse space response: {0}")]
    Parse(String),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<ClientError> for TransportError {
    fn from(e: ClientError) -> Self {
        Self(e.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Connection(format!("request timed out: {e}"))
        } else if e.is_connect() {
            Self::Connection(format!("connection failed: {e}"))
        } else if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Connection(e.to_string())
        }
    }
}
