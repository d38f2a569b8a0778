//! Veritas: search-grounded content authenticity analysis
//!
//! Takes user-submitted text, a URL and/or images, asks Gemini (with Google
//! Search grounding) for a verdict, and normalizes the answer into a strict
//! [`AnalysisResult`]. All judgement is delegated to the model; this crate
//! handles request assembly, response validation and error classification.
//!
//! # Usage
//!
//! ```rust,ignore
//! use veritas_core::{Analyzer, Attachment, Config};
//!
//! let analyzer = Analyzer::from_config(&Config::from_env()?)?;
//!
//! let result = analyzer
//!     .analyze(
//!         "Aliens landed in Ohio",
//!         "https://news.example/aliens",
//!         &[Attachment::from_path("screenshot.png")],
//!     )
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`input`] - Input aggregation and attachments
//! - [`encoder`] - Base64 encoding of attachments
//! - [`prompt`] - Instruction prompt and advisory output schema
//! - [`client`] - Provider trait and the Gemini implementation
//! - [`normalize`] - Validation and defaulting of provider output
//! - [`classify`] - Mapping provider failures to error categories
//! - [`analyzer`] - The `analyze` entry point
//! - [`session`] - Caller-side status tracking with retry
//! - [`testing`] - Mock provider for tests

pub mod analyzer;
pub mod classify;
pub mod client;
pub mod config;
pub mod encoder;
pub mod error;
pub mod input;
pub mod normalize;
pub mod prompt;
pub mod session;
pub mod testing;
pub mod types;

pub use analyzer::Analyzer;
pub use classify::{ErrorClassifier, GeminiErrorClassifier};
pub use client::{
    AnalysisClient, AnalysisProvider, AnalysisRequest, GroundingReference, ProviderResponse,
};
pub use config::Config;
pub use encoder::EncodedPart;
pub use error::{AnalysisError, Result};
pub use input::{Attachment, AttachmentSource, InputState};
pub use session::Session;
pub use types::{AnalysisResult, AnalysisStatus, Classification, Sentiment, VerificationSource};
