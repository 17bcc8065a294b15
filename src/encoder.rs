//! Report encoding
//!
//! This module wraps engine output into a `RecoveryReport` with producer
//! metadata and a computation timestamp. Score values pass through untouched,
//! so identical inputs always encode identical scores.

use crate::error::ComputeError;
use crate::suggestions::suggest;
use crate::types::{RecoveryInput, RecoveryReport, RecoveryScores, ReportProducer};
use crate::{FLUX_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// What the encoder includes beyond the headline scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub include_diagnostics: bool,
    pub include_suggestions: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            include_diagnostics: true,
            include_suggestions: true,
        }
    }
}

/// Report encoder for producing JSON payloads
pub struct ReportEncoder {
    instance_id: String,
    options: EncodeOptions,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            options: EncodeOptions::default(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self {
            instance_id,
            options: EncodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Encode engine output into a report
    pub fn encode(&self, input: &RecoveryInput, scores: &RecoveryScores) -> RecoveryReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: FLUX_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let mut scores = scores.clone();
        if !self.options.include_diagnostics {
            scores.diagnostics = None;
        }

        let suggestions = if self.options.include_suggestions {
            suggest(input)
        } else {
            Vec::new()
        };

        RecoveryReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            computed_at_utc: Utc::now().to_rfc3339(),
            input: input.clone(),
            scores,
            suggestions,
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(
        &self,
        input: &RecoveryInput,
        scores: &RecoveryScores,
    ) -> Result<String, ComputeError> {
        let report = self.encode(input, scores);
        serde_json::to_string_pretty(&report).map_err(|e| ComputeError::EncodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RecoveryEngine;
    use crate::types::Tier;

    fn poor_input() -> RecoveryInput {
        let mut input = RecoveryInput::default();
        input.environment.screen_hours = 2.5;
        input
    }

    #[test]
    fn test_encode_report() {
        let input = RecoveryInput::default();
        let scores = RecoveryEngine::compute(&input).unwrap();
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let report = encoder.encode(&input, &scores);

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.version, FLUX_VERSION);
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.input, input);
        assert_eq!(report.scores.tiers.overall, Tier::Diamond);
        assert!(report.scores.diagnostics.is_some());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_options_strip_sections() {
        let input = poor_input();
        let scores = RecoveryEngine::compute(&input).unwrap();

        let full = ReportEncoder::new().encode(&input, &scores);
        assert_eq!(full.suggestions.len(), 1);

        let lean = ReportEncoder::new()
            .with_options(EncodeOptions {
                include_diagnostics: false,
                include_suggestions: false,
            })
            .encode(&input, &scores);
        assert!(lean.scores.diagnostics.is_none());
        assert!(lean.suggestions.is_empty());
        assert_eq!(lean.scores.cri, full.scores.cri);
    }

    #[test]
    fn test_encode_to_json() {
        let input = RecoveryInput::default();
        let scores = RecoveryEngine::compute(&input).unwrap();
        let json = ReportEncoder::new().encode_to_json(&input, &scores).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("report_version").is_some());
        assert!(parsed.get("producer").is_some());
        assert!(parsed.get("computed_at_utc").is_some());
        assert_eq!(parsed["scores"]["cri"], 94.7);
        assert_eq!(parsed["scores"]["tiers"]["mri"], "diamond");
        assert_eq!(parsed["scores"]["progression"]["level"], "level_2");
        // Empty suggestion lists are omitted
        assert!(parsed.get("suggestions").is_none());
    }
}
