//! Pipeline orchestration
//!
//! This module provides the public API for Recovery Flux.
//! It orchestrates the full engine from an input snapshot to scored output,
//! and from raw record JSON to report JSON.

use crate::adapter::{InputRecord, RecordAdapter};
use crate::classifier::{classify, gauges};
use crate::combiner::combine;
use crate::encoder::{EncodeOptions, ReportEncoder};
use crate::error::ComputeError;
use crate::modifiers::apply_chain;
use crate::normalizer::Normalizer;
use crate::progression::progress;
use crate::soft_cap::{self, scaled_watch};
use crate::types::{
    Diagnostics, IndexKind, ModifierSet, RawIndex, RecoveryInput, RecoveryReport, RecoveryScores,
};

/// Stateless scoring engine
pub struct RecoveryEngine;

impl RecoveryEngine {
    /// Score one input snapshot.
    ///
    /// Stages:
    /// 1. Normalizer - Raw metrics to bounded factor scores
    /// 2. Index combiner - Weighted geometric mean per index
    /// 3. Modifier chain - Environment multipliers
    /// 4. Soft cap - Harmonic blend with the device score, scaled to 0-100
    /// 5. Classifier and progression
    pub fn compute(input: &RecoveryInput) -> Result<RecoveryScores, ComputeError> {
        input.ensure_finite()?;

        // Stage 1: Normalize
        let factors = Normalizer::normalize(&input.sleep);

        // Stage 2: Combine
        let gm_cog = combine(&factors, IndexKind::Cognitive);
        let gm_musc = combine(&factors, IndexKind::Muscular);

        // Stage 3: Modify
        let env = &input.environment;
        let raw = RawIndex {
            gm_cog,
            gm_musc,
            cri_raw: apply_chain(gm_cog, env, IndexKind::Cognitive),
            mri_raw: apply_chain(gm_musc, env, IndexKind::Muscular),
        };

        // Stage 4: Soft cap
        let index = soft_cap::combine(raw.cri_raw, raw.mri_raw, input.sleep.device_sleep_score);

        tracing::debug!(
            cri_raw = raw.cri_raw,
            mri_raw = raw.mri_raw,
            cri = index.cri,
            mri = index.mri,
            overall = index.overall,
            "computed recovery indices"
        );

        // Stage 5: Classify and progress
        let tiers = classify(&index);
        let progression = progress(&index, input);

        Ok(RecoveryScores {
            cri: index.cri,
            mri: index.mri,
            overall: index.overall,
            tiers,
            gauges: gauges(&index),
            progression,
            diagnostics: Some(Diagnostics {
                continuity_mode: input.sleep.continuity.mode(),
                factors,
                modifiers: ModifierSet::from_environment(env),
                raw,
                watch_scaled: scaled_watch(input.sleep.device_sleep_score),
            }),
        })
    }
}

/// Convert a raw JSON input record to a report JSON payload.
///
/// # Arguments
/// * `raw_json` - A flat input record (see `InputRecord`)
///
/// # Example
/// ```ignore
/// let report = recovery_from_json(r#"{"tst": 7.5, "wakes": 2}"#.to_string())?;
/// ```
pub fn recovery_from_json(raw_json: String) -> Result<String, ComputeError> {
    RecoveryProcessor::new().process_json(&raw_json)
}

/// Processor carrying input defaults and an encoder across calls.
///
/// Each call is still scored from scratch; only configuration is shared.
pub struct RecoveryProcessor {
    defaults: InputRecord,
    encoder: ReportEncoder,
}

impl Default for RecoveryProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryProcessor {
    /// Create a processor with built-in defaults
    pub fn new() -> Self {
        Self {
            defaults: InputRecord::default(),
            encoder: ReportEncoder::new(),
        }
    }

    /// Create a processor that fills omitted fields from `defaults`
    pub fn with_defaults(defaults: InputRecord) -> Self {
        Self {
            defaults,
            encoder: ReportEncoder::new(),
        }
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.encoder = self.encoder.with_options(options);
        self
    }

    /// Resolve a record against the configured defaults
    pub fn resolve(&self, record: InputRecord) -> Result<RecoveryInput, ComputeError> {
        RecordAdapter::to_input(&record.overlay(&self.defaults))
    }

    /// Score one record and build its report
    pub fn process_record(&self, record: InputRecord) -> Result<RecoveryReport, ComputeError> {
        let input = self.resolve(record)?;
        let scores = RecoveryEngine::compute(&input)?;
        Ok(self.encoder.encode(&input, &scores))
    }

    /// Process a single JSON record into report JSON
    pub fn process_json(&self, raw_json: &str) -> Result<String, ComputeError> {
        let record = RecordAdapter::parse(raw_json)?;
        let input = self.resolve(record)?;
        let scores = RecoveryEngine::compute(&input)?;
        self.encoder.encode_to_json(&input, &scores)
    }

    /// Process NDJSON records, one report per record
    pub fn process_ndjson(&self, ndjson: &str) -> Result<Vec<RecoveryReport>, ComputeError> {
        RecordAdapter::parse_ndjson(ndjson)?
            .into_iter()
            .map(|record| self.process_record(record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Continuity, Level, Tier};
    use proptest::prelude::*;

    fn sample_record_json() -> &'static str {
        r#"{
            "total_sleep_hours": 7.8,
            "deep_sleep_hours": 1.6,
            "rem_sleep_hours": 1.8,
            "continuity_mode": "wake_count",
            "wake_count": 1,
            "bedtime_sd_hours": 0.6,
            "wake_time_sd_hours": 0.7,
            "device_sleep_score": 82,
            "temperature_c": 23,
            "humidity_pct": 50,
            "screen_hours": 0.8,
            "last_meal_hours": 2.0,
            "earplugs": 0,
            "streak_days": 0
        }"#
    }

    fn waso_input(minutes: f64) -> RecoveryInput {
        let mut input = RecoveryInput::default();
        input.sleep.continuity = Continuity::Waso { minutes };
        input
    }

    #[test]
    fn test_default_scenario() {
        let scores = RecoveryEngine::compute(&RecoveryInput::default()).unwrap();

        assert_eq!(scores.cri, 94.7);
        assert_eq!(scores.mri, 94.6);
        assert_eq!(scores.overall, 94.6);
        assert_eq!(scores.tiers.cri, Tier::Diamond);
        assert_eq!(scores.tiers.mri, Tier::Diamond);
        assert_eq!(scores.tiers.overall, Tier::Diamond);

        let diagnostics = scores.diagnostics.unwrap();
        assert!((diagnostics.factors.qty - 0.9802).abs() < 0.0001);
        assert!((diagnostics.factors.cont - 0.94).abs() < 1e-12);
        assert!((diagnostics.factors.reg - 0.6538).abs() < 0.0001);
        assert!((diagnostics.watch_scaled - 0.91).abs() < 1e-12);
    }

    #[test]
    fn test_waso_scenario_is_lower() {
        let wake = RecoveryEngine::compute(&RecoveryInput::default()).unwrap();
        let waso = RecoveryEngine::compute(&waso_input(90.0)).unwrap();

        let diagnostics = waso.diagnostics.as_ref().unwrap();
        assert!((diagnostics.factors.cont - 0.70).abs() < 1e-12);
        assert_eq!(waso.cri, 92.7);
        assert_eq!(waso.mri, 92.6);
        assert!(waso.cri < wake.cri);
        assert!(waso.mri < wake.mri);
    }

    #[test]
    fn test_earplugs_raise_mri_only() {
        let mut input = RecoveryInput::default();
        input.environment.earplugs = 2;
        let scores = RecoveryEngine::compute(&input).unwrap();

        assert_eq!(scores.cri, 94.7);
        assert_eq!(scores.mri, 95.5);
        assert_eq!(scores.overall, 95.1);
    }

    #[test]
    fn test_worst_case_inputs_stay_in_range() {
        let input = RecoveryInput {
            sleep: crate::types::SleepMetrics {
                total_sleep_hours: 4.0,
                deep_sleep_hours: 0.3,
                rem_sleep_hours: 0.3,
                continuity: Continuity::WakeCount { wakes: 6 },
                bedtime_sd_hours: 3.0,
                wake_time_sd_hours: 3.0,
                device_sleep_score: 0.0,
            },
            environment: crate::types::EnvironmentMetrics {
                temperature_c: 15.0,
                humidity_pct: 20.0,
                screen_hours: 4.0,
                last_meal_hours: 0.0,
                earplugs: 0,
            },
            streak_days: 0,
        };
        let scores = RecoveryEngine::compute(&input).unwrap();

        assert_eq!(scores.cri, 37.3);
        assert_eq!(scores.mri, 38.1);
        assert_eq!(scores.overall, 37.7);
        assert_eq!(scores.tiers.overall, Tier::Bronze);
        assert_eq!(scores.progression.xp, 0);
        assert_eq!(scores.progression.level, Level::Level1);
    }

    #[test]
    fn test_nan_input_rejected() {
        let mut input = RecoveryInput::default();
        input.sleep.total_sleep_hours = f64::NAN;

        let err = RecoveryEngine::compute(&input).unwrap_err();
        assert_eq!(err.field(), Some("total_sleep_hours"));
    }

    #[test]
    fn test_serialization_round_trip_is_bit_identical() {
        let input = waso_input(37.5);
        let json = serde_json::to_string(&input).unwrap();
        let restored: RecoveryInput = serde_json::from_str(&json).unwrap();

        let before = RecoveryEngine::compute(&input).unwrap();
        let after = RecoveryEngine::compute(&restored).unwrap();
        assert_eq!(before.cri.to_bits(), after.cri.to_bits());
        assert_eq!(before.mri.to_bits(), after.mri.to_bits());
        assert_eq!(before.overall.to_bits(), after.overall.to_bits());
        assert_eq!(before, after);
    }

    #[test]
    fn test_recovery_from_json() {
        let report = recovery_from_json(sample_record_json().to_string()).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(payload["report_version"], "1.0.0");
        assert_eq!(payload["producer"]["name"], "recovery-flux");
        assert_eq!(payload["scores"]["cri"], 94.7);
        assert_eq!(payload["scores"]["overall"], 94.6);
        assert_eq!(payload["input"]["sleep"]["continuity"]["mode"], "wake_count");
    }

    #[test]
    fn test_missing_continuity_is_invalid_input() {
        let err = recovery_from_json(r#"{"tst": 7.0}"#.to_string()).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidInput { ref field, .. } if field == "continuity"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(recovery_from_json("not valid json".to_string()).is_err());
    }

    #[test]
    fn test_processor_defaults_fill_record() {
        let defaults = InputRecord {
            continuity_mode: Some(crate::types::ContinuityMode::WasoMinutes),
            waso_minutes: Some(90.0),
            ..Default::default()
        };
        let processor = RecoveryProcessor::with_defaults(defaults);

        let report = processor.process_record(InputRecord::default()).unwrap();
        assert_eq!(report.scores.cri, 92.7);

        // Record continuity overrides the configured one as a unit
        let report = processor
            .process_record(InputRecord {
                wake_count: Some(1),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(report.scores.cri, 94.7);
    }

    #[test]
    fn test_process_ndjson() {
        let processor = RecoveryProcessor::new();
        let reports = processor
            .process_ndjson("{\"wakes\": 1}\n{\"waso\": 90}\n")
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports[0].scores.cri > reports[1].scores.cri);
    }

    proptest! {
        #[test]
        fn scores_in_range_and_deterministic(
            tst in 4.0f64..=10.0,
            sws in 0.3f64..=3.0,
            rem in 0.3f64..=3.0,
            wakes in 0u32..=6,
            bt in 0.0f64..=3.0,
            wu in 0.0f64..=3.0,
            score in 0.0f64..=100.0,
            temp in 15.0f64..=30.0,
            rh in 20.0f64..=80.0,
            screens in 0.0f64..=4.0,
            meal in 0.0f64..=5.0,
            earplugs in 0u8..=2,
        ) {
            let input = RecoveryInput {
                sleep: crate::types::SleepMetrics {
                    total_sleep_hours: tst,
                    deep_sleep_hours: sws,
                    rem_sleep_hours: rem,
                    continuity: Continuity::WakeCount { wakes },
                    bedtime_sd_hours: bt,
                    wake_time_sd_hours: wu,
                    device_sleep_score: score,
                },
                environment: crate::types::EnvironmentMetrics {
                    temperature_c: temp,
                    humidity_pct: rh,
                    screen_hours: screens,
                    last_meal_hours: meal,
                    earplugs,
                },
                streak_days: 0,
            };

            let first = RecoveryEngine::compute(&input).unwrap();
            let second = RecoveryEngine::compute(&input).unwrap();
            prop_assert_eq!(&first, &second);

            for value in [first.cri, first.mri, first.overall] {
                prop_assert!((0.0..=100.0).contains(&value));
                // One decimal place
                prop_assert!(((value * 10.0).round() - value * 10.0).abs() < 1e-6);
            }
        }
    }
}
