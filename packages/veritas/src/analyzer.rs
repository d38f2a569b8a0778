//! Caller-facing analysis entry point.
//!
//! ```rust,ignore
//! use veritas_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::from_config(&Config::from_env()?)?;
//! let result = analyzer.analyze("Aliens landed in Ohio", "", &[]).await?;
//! println!("{} ({}%)", result.classification, result.confidence_score);
//! ```

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::classify::{ErrorClassifier, GeminiErrorClassifier};
use crate::client::{AnalysisClient, AnalysisProvider, AnalysisRequest};
use crate::config::Config;
use crate::encoder::encode_all;
use crate::error::{AnalysisError, Result};
use crate::input::{has_content, Attachment, InputState};
use crate::normalize::normalize;
use crate::prompt::compose_prompt;
use crate::types::AnalysisResult;

/// Runs one analysis per call. Holds no per-invocation state, so a single
/// instance can be shared across tasks.
#[derive(Clone)]
pub struct Analyzer {
    provider: Arc<dyn AnalysisProvider>,
    classifier: Arc<dyn ErrorClassifier>,
}

impl Analyzer {
    /// Wrap a provider, classifying its errors with Gemini's rules.
    pub fn new(provider: impl AnalysisProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
            classifier: Arc::new(GeminiErrorClassifier),
        }
    }

    /// Gemini-backed analyzer. Fails with a configuration error when the API
    /// key is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(AnalysisClient::new(config)?))
    }

    /// Replace the error classification rules.
    pub fn with_classifier(mut self, classifier: impl ErrorClassifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// Analyze text, a URL and/or attachments.
    ///
    /// Refuses with [`AnalysisError::EmptyInput`] without calling the provider
    /// when there is nothing to analyze. Makes at most one provider call and
    /// never retries; the result is either complete or an error.
    pub async fn analyze(
        &self,
        text: &str,
        url: &str,
        files: &[Attachment],
    ) -> Result<AnalysisResult> {
        if !has_content(text, url, files) {
            return Err(AnalysisError::EmptyInput);
        }

        let start = Instant::now();

        let request = AnalysisRequest {
            prompt_text: compose_prompt(text, url),
            encoded_parts: encode_all(files).await?,
        };

        let response = match self.provider.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Gemini analysis failed");
                let classified = self.classifier.classify(e);
                warn!(category = classified.category(), "Analysis failed");
                return Err(classified);
            }
        };

        let result = normalize(&response.raw_text, &response.grounding_references)?;

        info!(
            classification = %result.classification,
            confidence = result.confidence_score,
            sentiment = %result.sentiment,
            sources = result.verification_sources.len(),
            duration_ms = start.elapsed().as_millis(),
            "Analysis complete"
        );

        Ok(result)
    }

    /// Analyze a snapshot of the caller's input.
    pub async fn analyze_input(&self, input: &InputState) -> Result<AnalysisResult> {
        self.analyze(&input.text, &input.url, &input.files).await
    }
}
