//! Response normalizer: untyped provider output to [`AnalysisResult`].
//!
//! The provider's JSON only follows the requested shape on a best-effort
//! basis, so every field is re-validated and defaulted here. Nothing outside
//! this module reads provider-shaped data.

use gemini_client::strip_code_blocks;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::warn;

use crate::client::GroundingReference;
use crate::error::{AnalysisError, Result};
use crate::types::{AnalysisResult, Classification, Sentiment, VerificationSource};

pub const DEFAULT_SUMMARY: &str = "No summary provided.";
pub const DEFAULT_SOURCE_TITLE: &str = "Source";

const PARSE_FAILURE: &str =
    "The AI response could not be parsed. The model might have been interrupted.";

/// Parse, validate and default the model's answer, and attach deduplicated
/// grounding sources.
pub fn normalize(raw_text: &str, grounding: &[GroundingReference]) -> Result<AnalysisResult> {
    let cleaned = strip_code_blocks(raw_text);

    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        warn!(error = %e, response_len = raw_text.len(), "Failed to parse model response as JSON");
        AnalysisError::Data(PARSE_FAILURE.into())
    })?;

    let fields = value.as_object().ok_or_else(|| {
        warn!("Model response is JSON but not an object");
        AnalysisError::Data(PARSE_FAILURE.into())
    })?;

    Ok(AnalysisResult {
        classification: classification(fields),
        confidence_score: confidence_score(fields),
        summary: summary(fields),
        key_risk_factors: key_risk_factors(fields),
        sentiment: sentiment(fields),
        verification_sources: extract_sources(grounding),
    })
}

fn classification(fields: &Map<String, Value>) -> Classification {
    fields
        .get("classification")
        .and_then(Value::as_str)
        .and_then(Classification::parse)
        .unwrap_or_default()
}

/// Missing or non-numeric scores become 0; out-of-range scores are clamped.
fn confidence_score(fields: &Map<String, Value>) -> u8 {
    let Some(score) = fields.get("confidenceScore").and_then(Value::as_f64) else {
        return 0;
    };

    if !(0.0..=100.0).contains(&score) {
        warn!(score, "Confidence score out of range, clamping to 0-100");
    }

    score.round().clamp(0.0, 100.0) as u8
}

fn summary(fields: &Map<String, Value>) -> String {
    fields
        .get("summary")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SUMMARY)
        .to_string()
}

/// Non-string entries are dropped.
fn key_risk_factors(fields: &Map<String, Value>) -> Vec<String> {
    fields
        .get("keyRiskFactors")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn sentiment(fields: &Map<String, Value>) -> Sentiment {
    fields
        .get("sentiment")
        .and_then(Value::as_str)
        .and_then(Sentiment::parse)
        .unwrap_or_default()
}

/// Sources from grounding references that carry a URI, unique by URL.
///
/// The first title seen for a URL wins and first-seen order is kept.
pub fn extract_sources(grounding: &[GroundingReference]) -> Vec<VerificationSource> {
    let mut seen = HashSet::new();

    grounding
        .iter()
        .filter_map(|reference| {
            let url = reference.uri.as_deref().filter(|u| !u.is_empty())?;
            Some(VerificationSource {
                title: reference
                    .title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string()),
                url: url.to_string(),
            })
        })
        .filter(|source| seen.insert(source.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "classification": "FAKE",
        "confidenceScore": 92,
        "summary": "No credible reports of a landing exist.",
        "keyRiskFactors": ["No sources", "Sensational headline"],
        "sentiment": "Alarmist"
    }"#;

    #[test]
    fn test_full_response() {
        let result = normalize(FULL, &[]).unwrap();

        assert_eq!(result.classification, Classification::Fake);
        assert_eq!(result.confidence_score, 92);
        assert_eq!(result.summary, "No credible reports of a landing exist.");
        assert_eq!(result.key_risk_factors, ["No sources", "Sensational headline"]);
        assert_eq!(result.sentiment, Sentiment::Alarmist);
        assert!(result.verification_sources.is_empty());
    }

    #[test]
    fn test_fenced_response_parses_like_bare() {
        let fenced = format!("```json\n{}\n```", FULL);
        assert_eq!(normalize(&fenced, &[]).unwrap(), normalize(FULL, &[]).unwrap());

        let untagged = format!("```\n{}\n```", FULL);
        assert_eq!(normalize(&untagged, &[]).unwrap(), normalize(FULL, &[]).unwrap());
    }

    #[test]
    fn test_unknown_classification_defaults_to_unverifiable() {
        let result = normalize(r#"{"classification": "BOGUS"}"#, &[]).unwrap();
        assert_eq!(result.classification, Classification::Unverifiable);

        let result = normalize(r#"{"classification": 7}"#, &[]).unwrap();
        assert_eq!(result.classification, Classification::Unverifiable);
    }

    #[test]
    fn test_empty_object_gets_all_defaults() {
        let result = normalize("{}", &[]).unwrap();

        assert_eq!(result.classification, Classification::Unverifiable);
        assert_eq!(result.confidence_score, 0);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
        assert!(result.key_risk_factors.is_empty());
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_wrong_types_fall_back() {
        let result = normalize(
            r#"{"confidenceScore": "92", "keyRiskFactors": "none", "sentiment": "Furious"}"#,
            &[],
        )
        .unwrap();

        assert_eq!(result.confidence_score, 0);
        assert!(result.key_risk_factors.is_empty());
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_non_string_risk_factors_dropped() {
        let result = normalize(r#"{"keyRiskFactors": ["a", 1, null, "b"]}"#, &[]).unwrap();
        assert_eq!(result.key_risk_factors, ["a", "b"]);
    }

    #[test]
    fn test_confidence_score_clamped_and_rounded() {
        assert_eq!(normalize(r#"{"confidenceScore": 150}"#, &[]).unwrap().confidence_score, 100);
        assert_eq!(normalize(r#"{"confidenceScore": -5}"#, &[]).unwrap().confidence_score, 0);
        assert_eq!(normalize(r#"{"confidenceScore": 87.6}"#, &[]).unwrap().confidence_score, 88);
    }

    #[test]
    fn test_unparseable_is_data_error() {
        let err = normalize("Sorry, I can't help with that.", &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::Data(_)));
        assert!(err.to_string().starts_with("Data Error:"));

        let err = normalize("[1, 2, 3]", &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::Data(_)));
    }

    #[test]
    fn test_sources_deduplicated_by_url() {
        let grounding = vec![
            GroundingReference::new("A", "http://x"),
            GroundingReference::new("B", "http://x"),
            GroundingReference::new("C", "http://y"),
        ];

        let sources = extract_sources(&grounding);

        assert_eq!(
            sources,
            vec![
                VerificationSource {
                    title: "A".into(),
                    url: "http://x".into()
                },
                VerificationSource {
                    title: "C".into(),
                    url: "http://y".into()
                },
            ]
        );
    }

    #[test]
    fn test_sources_skip_missing_uri_and_default_title() {
        let grounding = vec![
            GroundingReference {
                title: Some("No link".into()),
                uri: None,
            },
            GroundingReference {
                title: None,
                uri: Some("https://factcheck.example".into()),
            },
        ];

        let sources = extract_sources(&grounding);

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, DEFAULT_SOURCE_TITLE);
        assert_eq!(sources[0].url, "https://factcheck.example");
    }
}
