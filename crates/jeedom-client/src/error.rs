//! Error types for Jeedom client operations

use thiserror::Error;

/// Result type alias for Jeedom client operations
pub type Result<T> = std::result::Result<T, JeedomClientError>;

/// Errors that can occur during Jeedom client operations
#[derive(Error, Debug)]
pub enum JeedomClientError {
    /// Request never completed (DNS, connection refused, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a status outside 200..=299
    #[error("HTTP Error: {status} {message}")]
    HttpStatus { status: u16, message: String },

    /// A JSON endpoint returned a non-empty body that is not JSON
    #[error("JSON parse error: {body}")]
    ResponseFormat {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Header name or value rejected by the HTTP stack
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// No base URL configured
    #[error("No base URL configured")]
    MissingBaseUrl,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JeedomClientError {
    /// Create an HTTP status error from status code and message
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code, if the server answered with a non-2xx status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request failed before a response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
