use thiserror::Error;

/// Errors produced by the query pipeline.
///
/// Every `execute` failure is exactly one of these; none are recovered
/// locally and none trigger retries.
#[derive(Debug, Error)]
pub enum DatasourceError {
    /// The outbound request could not be constructed (malformed URL,
    /// header assembly failure). No I/O was performed.
    #[error("Failed to create request. error: {0}")]
    RequestBuild(String),

    /// The outbound query document could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Connection, TLS, or timeout failure while the call was in flight.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The caller cancelled the in-flight call through its token.
    #[error("Request cancelled")]
    Cancelled,

    /// The backend answered with a non-2xx status. The raw body is kept
    /// for diagnostics, not parsed as data.
    #[error("Request failed status: {status}")]
    BackendStatus { status: String, body: String },

    /// The backend answered 2xx but the body was not a valid series array.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Invalid executor input: empty batch, empty time-range bound, or
    /// targets resolving to more than one datasource URL.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DatasourceError {
    fn from(err: serde_json::Error) -> Self {
        DatasourceError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for DatasourceError {
    fn from(err: reqwest::Error) -> Self {
        DatasourceError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DatasourceError>;
