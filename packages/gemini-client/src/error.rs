//! Error types for Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response: auth, quota, invalid request)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The prompt or candidate was blocked by the provider's safety filters
    #[error("Blocked by provider: {0}")]
    Blocked(String),

    /// The model returned no text
    #[error("Empty response: the model returned no content")]
    EmptyResponse,

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// HTTP status code, if the error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a network error from a reqwest failure, keeping the cause chain
    /// (reqwest hides "connection refused" and friends behind `source()`).
    pub(crate) fn from_transport(error: &reqwest::Error) -> Self {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        GeminiError::Network(message)
    }
}
