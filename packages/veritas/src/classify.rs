//! Error classifier: provider failures to user-facing categories.
//!
//! Classification is heuristic. It matches status codes and message markers
//! that Gemini happens to use today; the provider does not promise them. The
//! rules sit behind [`ErrorClassifier`] so another provider's rules can be
//! swapped in without touching callers.

use gemini_client::GeminiError;

use crate::error::AnalysisError;

/// Maps a provider failure to exactly one [`AnalysisError`].
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, error: GeminiError) -> AnalysisError;
}

const AUTH_STATUSES: &[u16] = &[401, 403];
const AUTH_MARKERS: &[&str] = &["API key", "API_KEY_INVALID", "PERMISSION_DENIED", "UNAUTHENTICATED"];

const RATE_LIMIT_STATUS: u16 = 429;
const RATE_LIMIT_MARKERS: &[&str] = &["429", "RESOURCE_EXHAUSTED"];

const SAFETY_MARKER: &str = "SAFETY";

/// Rules for Gemini error responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiErrorClassifier;

impl ErrorClassifier for GeminiErrorClassifier {
    fn classify(&self, error: GeminiError) -> AnalysisError {
        match error {
            GeminiError::Config(message) => AnalysisError::Configuration(message),
            GeminiError::Network(detail) => AnalysisError::Network { detail },
            GeminiError::Blocked(reason) => AnalysisError::SafetyBlocked { reason },
            GeminiError::EmptyResponse => {
                AnalysisError::Data("The AI model returned no content.".into())
            }
            GeminiError::Parse(detail) => AnalysisError::Data(format!(
                "The AI service returned an unreadable response ({}).",
                detail
            )),
            GeminiError::Api { status, message } => {
                if AUTH_STATUSES.contains(&status) || contains_any(&message, AUTH_MARKERS) {
                    AnalysisError::AuthenticationFailed { detail: message }
                } else if status == RATE_LIMIT_STATUS || contains_any(&message, RATE_LIMIT_MARKERS) {
                    AnalysisError::RateLimited { detail: message }
                } else if message.contains(SAFETY_MARKER) {
                    AnalysisError::SafetyBlocked { reason: message }
                } else {
                    AnalysisError::Provider(GeminiError::Api { status, message })
                }
            }
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
