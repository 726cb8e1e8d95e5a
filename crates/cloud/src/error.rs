//! Error types for the cloud client.

use thiserror::Error;

/// Result type alias for cloud operations.
pub type Result<T> = std::result::Result<T, CloudError>;

/// Maximum number of body bytes kept in a transport error.
const MAX_BODY_SNIPPET: usize = 256;

/// Errors that can occur while talking to the cloud service.
#[derive(Debug, Error)]
pub enum CloudError {
    /// The HTTP call did not complete (connection, TLS, timeout, malformed HTTP).
    /// The request URL is stripped since its query carries the session token.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status and no readable envelope
    #[error("HTTP error ({status}): {body}")]
    HttpStatus { status: u16, body: String },

    /// Login was rejected by the account server
    #[error("Authentication failed ({code}): {message}")]
    Authentication { code: i64, message: String },

    /// A post-login call returned a non-zero application status code
    #[error("Request failed ({code}): {message}")]
    Request { code: i64, message: String },

    /// Status codes indicated success but the expected structure was missing
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A device-scoped lookup returned nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller supplied something that cannot be sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for CloudError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl CloudError {
    /// Create an HTTP status error, truncating the body.
    pub fn http_status(status: u16, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_BODY_SNIPPET) {
            Some((idx, _)) => format!("{}...", &body[..idx]),
            None => body.to_string(),
        };
        Self::HttpStatus { status, body }
    }

    /// Create an authentication error
    pub fn authentication(code: i64, message: impl Into<String>) -> Self {
        Self::Authentication {
            code,
            message: message.into(),
        }
    }

    /// Create a request error
    pub fn request(code: i64, message: impl Into<String>) -> Self {
        Self::Request {
            code,
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// True when the network call itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    /// The application status code, if the server sent one.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::Authentication { code, .. } | Self::Request { code, .. } => Some(*code),
            _ => None,
        }
    }
}
