//! Caller-side session state: the input being edited, the invocation status
//! and the last outcome.
//!
//! The analyzer does not guard against overlapping calls. The session does:
//! `begin` refuses while an analysis is already in flight.

use tracing::debug;

use crate::analyzer::Analyzer;
use crate::error::AnalysisError;
use crate::input::InputState;
use crate::types::{AnalysisResult, AnalysisStatus};

const FALLBACK_ERROR: &str = "An unexpected error occurred during analysis.";

#[derive(Debug, Default)]
pub struct Session {
    input: InputState,
    status: AnalysisStatus,
    result: Option<AnalysisResult>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    /// Result of the last successful analysis, cleared when a new one begins.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Message of the last failed analysis, cleared when a new one begins.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.status == AnalysisStatus::Analyzing
    }

    /// Whether the trigger should be enabled.
    pub fn can_analyze(&self) -> bool {
        !self.is_busy() && self.input.has_content()
    }

    /// Enter ANALYZING and return the input snapshot to analyze.
    ///
    /// Returns `None` (and changes nothing) while busy or when there is no
    /// content. Retrying after an error is just another `begin`.
    pub fn begin(&mut self) -> Option<InputState> {
        if !self.can_analyze() {
            return None;
        }

        self.status = AnalysisStatus::Analyzing;
        self.result = None;
        self.error = None;
        Some(self.input.clone())
    }

    pub fn complete(&mut self, result: AnalysisResult) {
        self.status = AnalysisStatus::Completed;
        self.result = Some(result);
        self.error = None;
    }

    pub fn fail(&mut self, error: &AnalysisError) {
        let message = error.to_string();
        self.status = AnalysisStatus::Error;
        self.result = None;
        self.error = Some(if message.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        });
    }

    /// Back to IDLE with empty input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One full begin / analyze / complete-or-fail cycle.
    ///
    /// Returns the resulting status; a refused `begin` leaves the status as it was.
    pub async fn run(&mut self, analyzer: &Analyzer) -> AnalysisStatus {
        let Some(snapshot) = self.begin() else {
            debug!(status = ?self.status, "Analysis not started");
            return self.status;
        };

        match analyzer.analyze_input(&snapshot).await {
            Ok(result) => self.complete(result),
            Err(e) => self.fail(&e),
        }

        self.status
    }
}
