//! Analysis client: one search-grounded Gemini call per analysis.
//!
//! The [`AnalysisProvider`] trait is the seam between the analyzer and the
//! network. [`AnalysisClient`] is the Gemini implementation; tests use
//! [`MockProvider`](crate::testing::MockProvider).

use async_trait::async_trait;
use gemini_client::{Content, GeminiClient, GeminiError, GenerateContentRequest, Part, Tool};
use tracing::{debug, info};

use crate::config::Config;
use crate::encoder::EncodedPart;
use crate::error::{AnalysisError, Result};

/// Everything sent for one invocation. Built fresh each time.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub prompt_text: String,

    /// Inline attachments, in the order the user supplied them
    pub encoded_parts: Vec<EncodedPart>,
}

/// A citation from search grounding. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundingReference {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl GroundingReference {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            uri: Some(uri.into()),
        }
    }
}

/// Raw provider output, consumed only by the normalizer.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub raw_text: String,
    pub grounding_references: Vec<GroundingReference>,
}

/// Anything that can run a search-grounded generation.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Perform exactly one generation call. No retries.
    async fn generate(&self, request: AnalysisRequest) -> gemini_client::Result<ProviderResponse>;
}

/// Gemini-backed [`AnalysisProvider`].
#[derive(Clone)]
pub struct AnalysisClient {
    client: GeminiClient,
    model: String,
}

impl AnalysisClient {
    /// Build from configuration.
    ///
    /// Fails with [`AnalysisError::Configuration`] when no usable API key is
    /// configured, before any network activity.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            AnalysisError::Configuration(
                "API Key is missing. Please set GEMINI_API_KEY in your environment.".into(),
            )
        })?;

        let mut client = GeminiClient::new(api_key);

        if let Some(base_url) = &config.base_url {
            client = client.with_base_url(base_url.as_str());
        }

        if let Some(timeout) = config.request_timeout {
            let http_client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| {
                    AnalysisError::Configuration(format!("Failed to build HTTP client: {}", e))
                })?;
            client = client.with_http_client(http_client);
        }

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Text part first, then one inline part per attachment, with search enabled
    /// and no response schema.
    pub(crate) fn build_request(request: AnalysisRequest) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(request.encoded_parts.len() + 1);
        parts.push(Part::text(request.prompt_text));
        parts.extend(
            request
                .encoded_parts
                .into_iter()
                .map(|p| Part::inline_data(p.mime_type, p.data)),
        );

        GenerateContentRequest::new()
            .content(Content::user(parts))
            .tool(Tool::google_search())
    }
}

#[async_trait]
impl AnalysisProvider for AnalysisClient {
    async fn generate(&self, request: AnalysisRequest) -> gemini_client::Result<ProviderResponse> {
        let attachment_count = request.encoded_parts.len();
        let prompt_len = request.prompt_text.len();
        let body = Self::build_request(request);

        info!(
            model = %self.model,
            prompt_len,
            attachment_count,
            "Calling Gemini with search grounding"
        );

        let response = self.client.generate_content(&self.model, &body).await?;

        if let Some(reason) = response.block_reason() {
            return Err(GeminiError::Blocked(reason.to_string()));
        }

        let raw_text = response.text().ok_or(GeminiError::EmptyResponse)?;

        let grounding_references: Vec<GroundingReference> = response
            .grounding_chunks()
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .map(|web| GroundingReference {
                title: web.title.clone(),
                uri: web.uri.clone(),
            })
            .collect();

        debug!(
            response_len = raw_text.len(),
            grounding_count = grounding_references.len(),
            "Gemini response received"
        );

        Ok(ProviderResponse {
            raw_text,
            grounding_references,
        })
    }
}

#[async_trait]
impl<P: AnalysisProvider + ?Sized> AnalysisProvider for std::sync::Arc<P> {
    async fn generate(&self, request: AnalysisRequest) -> gemini_client::Result<ProviderResponse> {
        (**self).generate(request).await
    }
}
