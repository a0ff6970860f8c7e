use thiserror::Error;

/// Failure modes of a single outbound fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The selected strategy is missing a credential, or a configured URL is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection, TLS or timeout failure; no HTTP status was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The upstream, or the intermediary service in front of it, answered non-2xx.
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream {
        /// The numeric HTTP status code.
        status: u16,
        /// The (truncated) response body, kept for logging.
        body: String,
    },

    /// A 2xx response whose body is not a JSON document.
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// The background fetch task died before producing a result.
    #[error("Fetch task failed: {0}")]
    Task(String),
}

impl FetchError {
    /// The HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Only 429 and 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status(), Some(429) | Some(500..=599))
    }
}
