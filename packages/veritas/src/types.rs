//! Result types handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Classification
// =============================================================================

/// Categorical verdict assigned to the analyzed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Real,
    Fake,
    Satire,
    Misleading,
    #[default]
    Unverifiable,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Classification::Real,
        Classification::Fake,
        Classification::Satire,
        Classification::Misleading,
        Classification::Unverifiable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Real => "REAL",
            Classification::Fake => "FAKE",
            Classification::Satire => "SATIRE",
            Classification::Misleading => "MISLEADING",
            Classification::Unverifiable => "UNVERIFIABLE",
        }
    }

    /// Parse a provider label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label))
    }

    /// Display colour (hex) for dashboards.
    pub fn color(&self) -> &'static str {
        match self {
            Classification::Real => "#22c55e",
            Classification::Fake => "#ef4444",
            Classification::Satire => "#a855f7",
            Classification::Misleading => "#f59e0b",
            Classification::Unverifiable => "#64748b",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sentiment
// =============================================================================

/// Tone of the analyzed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sentiment {
    #[default]
    Neutral,
    Alarmist,
    Biased,
    Objective,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Neutral,
        Sentiment::Alarmist,
        Sentiment::Biased,
        Sentiment::Objective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Neutral => "Neutral",
            Sentiment::Alarmist => "Alarmist",
            Sentiment::Biased => "Biased",
            Sentiment::Objective => "Objective",
        }
    }

    /// Parse a provider label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Result
// =============================================================================

/// A web source the provider consulted while verifying the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSource {
    pub title: String,
    pub url: String,
}

/// Normalized verdict for one analysis invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub classification: Classification,

    /// 0-100
    pub confidence_score: u8,

    pub summary: String,

    pub key_risk_factors: Vec<String>,

    pub sentiment: Sentiment,

    /// Unique by `url`, in first-seen order
    pub verification_sources: Vec<VerificationSource>,
}

/// Lifecycle of an invocation, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Analyzing,
    Completed,
    Error,
}
