//! Error types for the Tempo service

/// Result type alias using [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type for the Tempo service
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Route not found
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// A stream operation was attempted after a terminal transition
    #[error("Stream already reached a terminal state")]
    StreamTerminated,

    /// The client went away before the stream finished
    #[error("Stream closed by client")]
    StreamClosed,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] http::Error),

    /// Runtime error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Internal error (should not happen in production)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convert error to HTTP status code
    pub fn to_status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Error::StreamClosed => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
