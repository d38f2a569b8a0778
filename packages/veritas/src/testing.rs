//! Testing utilities including a mock provider.
//!
//! Useful for exercising the analyzer and session without network calls.

use async_trait::async_trait;
use gemini_client::GeminiError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::client::{AnalysisProvider, AnalysisRequest, GroundingReference, ProviderResponse};

const DEFAULT_RESPONSE: &str = r#"{
  "classification": "UNVERIFIABLE",
  "confidenceScore": 50,
  "summary": "Mock analysis.",
  "keyRiskFactors": [],
  "sentiment": "Neutral"
}"#;

/// A mock provider that replays queued outcomes and records every request.
///
/// Outcomes are returned in the order they were queued. Once the queue is
/// empty, a neutral UNVERIFIABLE response is returned.
#[derive(Default)]
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<gemini_client::Result<ProviderResponse>>>>,
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full provider response.
    pub fn with_response(self, response: ProviderResponse) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a raw text response with no grounding.
    pub fn with_text(self, raw_text: &str) -> Self {
        self.with_response(ProviderResponse {
            raw_text: raw_text.to_string(),
            grounding_references: Vec::new(),
        })
    }

    /// Queue a raw text response with grounding references.
    pub fn with_grounded_text(self, raw_text: &str, grounding: Vec<GroundingReference>) -> Self {
        self.with_response(ProviderResponse {
            raw_text: raw_text.to_string(),
            grounding_references: grounding,
        })
    }

    /// Queue a failure.
    pub fn with_error(self, error: GeminiError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// All requests received, in order.
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalysisProvider for MockProvider {
    async fn generate(&self, request: AnalysisRequest) -> gemini_client::Result<ProviderResponse> {
        self.requests.lock().unwrap().push(request);

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ProviderResponse {
                    raw_text: DEFAULT_RESPONSE.to_string(),
                    grounding_references: Vec::new(),
                })
            })
    }
}
