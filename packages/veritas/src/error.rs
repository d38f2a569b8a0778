//! Typed errors for the analysis core.
//!
//! Every variant renders as a complete, user-facing sentence so callers can
//! show `to_string()` verbatim next to a retry action.

use gemini_client::GeminiError;
use thiserror::Error;

/// Errors surfaced by [`Analyzer::analyze`](crate::Analyzer::analyze).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Missing or unusable credential, detected before any network call
    #[error("Configuration Error: {0}")]
    Configuration(String),

    /// Credential rejected or forbidden
    #[error("Authentication Failed: The provided API key is invalid or expired.")]
    AuthenticationFailed { detail: String },

    /// Quota or too-many-requests rejection
    #[error("Rate Limit Exceeded: The system is receiving too many requests. Please try again in a minute.")]
    RateLimited { detail: String },

    /// Connectivity or transport-level failure
    #[error("Network Error: Unable to connect to the AI service. Please check your internet connection.")]
    Network { detail: String },

    /// Provider content-safety rejection
    #[error("Safety Block: The content was flagged by safety filters and could not be analyzed.")]
    SafetyBlocked { reason: String },

    /// Empty or unparseable provider payload
    #[error("Data Error: {0}")]
    Data(String),

    /// An attachment could not be read
    #[error("Encoding Error: could not read attachment '{name}': {source}")]
    Encoding {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// No text, URL, or attachment was supplied
    #[error("Nothing to analyze: provide text, a URL, or at least one image.")]
    EmptyInput,

    /// Provider failure that matched no known pattern
    #[error(transparent)]
    Provider(#[from] GeminiError),
}

impl AnalysisError {
    /// Short machine-readable category, used in logs and JSON output.
    pub fn category(&self) -> &'static str {
        match self {
            AnalysisError::Configuration(_) => "configuration",
            AnalysisError::AuthenticationFailed { .. } => "authentication_failed",
            AnalysisError::RateLimited { .. } => "rate_limited",
            AnalysisError::Network { .. } => "network",
            AnalysisError::SafetyBlocked { .. } => "safety_blocked",
            AnalysisError::Data(_) => "data",
            AnalysisError::Encoding { .. } => "encoding",
            AnalysisError::EmptyInput => "empty_input",
            AnalysisError::Provider(_) => "provider",
        }
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = AnalysisError::RateLimited {
            detail: "RESOURCE_EXHAUSTED".into(),
        };
        assert!(err.to_string().starts_with("Rate Limit Exceeded:"));
        assert!(!err.to_string().contains("RESOURCE_EXHAUSTED"));

        let err = AnalysisError::Configuration("API key is missing.".into());
        assert_eq!(err.to_string(), "Configuration Error: API key is missing.");
    }

    #[test]
    fn test_provider_passthrough_is_unmodified() {
        let original = GeminiError::Api {
            status: 400,
            message: "INVALID_ARGUMENT: bad mime type".into(),
        };
        let expected = original.to_string();

        let err = AnalysisError::from(original);
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.category(), "provider");
    }
}
