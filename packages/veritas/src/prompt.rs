//! Instruction prompt sent with every analysis.
//!
//! Search grounding cannot be combined with a provider-enforced response
//! schema, so the expected JSON shape is described in the prompt text and the
//! normalizer re-validates whatever comes back.

use crate::types::{Classification, Sentiment};

const ROLE_AND_TASKS: &str = "\
You are Veritas, an advanced fake news detection system.
Your goal is to analyze the provided content (text, URL, or images) and determine its authenticity.

1. Check for factual accuracy against known sources (using Google Search).
2. Analyze the tone for sensationalism, clickbait, or emotional manipulation.
3. If images are provided, look for signs of AI generation or editing anomalies.
4. If a URL is provided, treat it as a source to verify.

CRITICAL OUTPUT INSTRUCTION:
You must return a valid JSON object. Do not include any other text, preamble, or markdown formatting.
The JSON must follow this structure:
";

/// Output shape the model is asked to follow, rendered as pretty JSON.
pub fn output_schema() -> String {
    let classifications = Classification::ALL.map(|c| c.as_str()).join(" | ");
    let sentiments = Sentiment::ALL.map(|s| s.as_str()).join(" | ");

    format!(
        r#"{{
  "classification": "{classifications}",
  "confidenceScore": "number (0-100)",
  "summary": "string (executive summary)",
  "keyRiskFactors": [
    "string",
    "string"
  ],
  "sentiment": "{sentiments}"
}}"#
    )
}

/// Build the instruction string for one analysis.
///
/// `text` is quoted and `url` named verbatim, text first. Neither is escaped:
/// quotes inside `text` end up inside the instruction as-is.
pub fn compose_prompt(text: &str, url: &str) -> String {
    let mut prompt = String::from(ROLE_AND_TASKS);
    prompt.push_str(&output_schema());

    if !text.trim().is_empty() {
        prompt.push_str(&format!("\n\nAnalyze this text context: \"{}\"", text));
    }

    if !url.trim().is_empty() {
        prompt.push_str(&format!("\n\nVerify facts related to this URL: {}", url));
    }

    prompt
}
