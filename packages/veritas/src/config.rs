use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::time::Duration;

use crate::error::{AnalysisError, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Provider configuration, passed explicitly to the analysis client.
///
/// The API key is redacted from `Debug` output.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            request_timeout: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// A missing key is not an error here; it is reported as a configuration
    /// error when the analysis client is built.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let request_timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AnalysisError::Configuration(format!(
                        "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key: lookup("GEMINI_API_KEY")
                .or_else(|| lookup("API_KEY"))
                .map(SecretString::from),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("GEMINI_BASE_URL"),
            request_timeout,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// The API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .filter(|k| !k.is_empty())
    }
}
