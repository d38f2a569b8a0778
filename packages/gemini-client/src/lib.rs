//! Pure Gemini REST API client
//!
//! A minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. Supports multimodal parts (text + inline data) and
//! Google Search grounding.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{Content, GeminiClient, GenerateContentRequest, Part, Tool};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let response = client
//!     .generate_content(
//!         "gemini-2.5-flash",
//!         &GenerateContentRequest::new()
//!             .content(Content::user(vec![Part::text("Hello!")]))
//!             .tool(Tool::google_search()),
//!     )
//!     .await?;
//!
//! println!("{}", response.text().unwrap_or_default());
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, test servers, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for `generateContent` on the given model.
    pub fn generate_content_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Generate content.
    ///
    /// Sends one request and returns the decoded response. Non-2xx responses
    /// become [`GeminiError::Api`] with the HTTP status; transport failures
    /// become [`GeminiError::Network`]. No retries.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.generate_content_url(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::from_transport(&e)
            })?;

        let status = response.status();

        // A body cut off mid-read is a transport failure, not a bad payload
        let body = response.text().await.map_err(|e| {
            warn!(status = %status, error = %e, "Failed to read Gemini response body");
            GeminiError::from_transport(&e)
        })?;

        if !status.is_success() {
            warn!(status = %status, error = %body, "Gemini API error");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: types::ApiErrorBody::describe(&body),
            });
        }

        let generated: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %model,
            candidates = generated.candidates.len(),
            duration_ms = start.elapsed().as_millis(),
            "Gemini generate content"
        );

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request with a raw HTTP response and return the base URL.
    async fn respond_once(raw_response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                request.extend_from_slice(&chunk[..n]);
                if n == 0 || request_complete(&request) {
                    break;
                }
            }
            socket.write_all(raw_response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= end + 4 + content_length
    }

    fn http_response(status: u16, body: &str) -> String {
        format!(
            "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    fn hello_request() -> GenerateContentRequest {
        GenerateContentRequest::new()
            .content(Content::user(vec![Part::text("hi")]))
            .tool(Tool::google_search())
    }

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("AIza-test").with_base_url("https://custom.api.com/v1/");

        assert_eq!(client.api_key, "AIza-test");
        assert_eq!(client.base_url, "https://custom.api.com/v1");
    }

    #[test]
    fn test_generate_content_url() {
        let client = GeminiClient::new("AIza-test");
        assert_eq!(
            client.generate_content_url("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = GeminiClient::new("AIza-test").with_base_url("http://127.0.0.1:1");
        let request = GenerateContentRequest::new().content(Content::user(vec![Part::text("hi")]));

        let err = client
            .generate_content("gemini-2.5-flash", &request)
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let base_url = respond_once(http_response(429, body)).await;
        let client = GeminiClient::new("AIza-test").with_base_url(base_url);

        let err = client
            .generate_content("gemini-2.5-flash", &hello_request())
            .await
            .unwrap_err();

        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_decodes_grounding() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "{}"}]}, "groundingMetadata": {"groundingChunks": [{"web": {"uri": "http://x", "title": "A"}}]}}]}"#;
        let base_url = respond_once(http_response(200, body)).await;
        let client = GeminiClient::new("AIza-test").with_base_url(base_url);

        let response = client
            .generate_content("gemini-2.5-flash", &hello_request())
            .await
            .unwrap();

        assert_eq!(response.text().as_deref(), Some("{}"));
        let web = response.grounding_chunks()[0].web.as_ref().unwrap();
        assert_eq!(web.uri.as_deref(), Some("http://x"));
        assert!(response.block_reason().is_none());
    }

    #[tokio::test]
    async fn test_truncated_body_is_network_error() {
        let raw = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\nConnection: close\r\n\r\n{\"candidates\": [".to_string();
        let base_url = respond_once(raw).await;
        let client = GeminiClient::new("AIza-test").with_base_url(base_url);

        let err = client
            .generate_content("gemini-2.5-flash", &hello_request())
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let base_url = respond_once(http_response(200, "<html>oops</html>")).await;
        let client = GeminiClient::new("AIza-test").with_base_url(base_url);

        let err = client
            .generate_content("gemini-2.5-flash", &hello_request())
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Parse(_)), "got {err:?}");
    }
}
