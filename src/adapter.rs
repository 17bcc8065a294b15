//! Input record adapter
//!
//! Front ends send a flat record: every metric as an optional field, plus a
//! continuity mode flag alongside optional WASO and wake-count readings. This
//! module resolves such records into the tagged `RecoveryInput` the engine
//! consumes. Omitted metrics fall back to the built-in defaults.

use crate::error::ComputeError;
use crate::types::{
    Continuity, ContinuityMode, EnvironmentMetrics, RecoveryInput, SleepMetrics,
};
use serde::{Deserialize, Serialize};

/// Flat, partially-filled input record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRecord {
    #[serde(alias = "tst", skip_serializing_if = "Option::is_none")]
    pub total_sleep_hours: Option<f64>,
    #[serde(alias = "sws", skip_serializing_if = "Option::is_none")]
    pub deep_sleep_hours: Option<f64>,
    #[serde(alias = "rem", skip_serializing_if = "Option::is_none")]
    pub rem_sleep_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuity_mode: Option<ContinuityMode>,
    #[serde(alias = "waso", skip_serializing_if = "Option::is_none")]
    pub waso_minutes: Option<f64>,
    #[serde(alias = "wakes", skip_serializing_if = "Option::is_none")]
    pub wake_count: Option<u32>,
    #[serde(alias = "bt_sd", skip_serializing_if = "Option::is_none")]
    pub bedtime_sd_hours: Option<f64>,
    #[serde(alias = "wu_sd", skip_serializing_if = "Option::is_none")]
    pub wake_time_sd_hours: Option<f64>,
    #[serde(alias = "sleep_score", skip_serializing_if = "Option::is_none")]
    pub device_sleep_score: Option<f64>,
    #[serde(alias = "temp", skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(alias = "rh", skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
    #[serde(alias = "screens", skip_serializing_if = "Option::is_none")]
    pub screen_hours: Option<f64>,
    #[serde(alias = "last_meal", skip_serializing_if = "Option::is_none")]
    pub last_meal_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earplugs: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<u32>,
}

impl InputRecord {
    /// Fill fields missing from `self` with those of `base`
    ///
    /// Continuity is treated as a unit: if `self` carries any continuity field,
    /// none are taken from `base`.
    pub fn overlay(self, base: &InputRecord) -> InputRecord {
        let has_continuity = self.continuity_mode.is_some()
            || self.waso_minutes.is_some()
            || self.wake_count.is_some();

        let (continuity_mode, waso_minutes, wake_count) = if has_continuity {
            (self.continuity_mode, self.waso_minutes, self.wake_count)
        } else {
            (base.continuity_mode, base.waso_minutes, base.wake_count)
        };

        InputRecord {
            total_sleep_hours: self.total_sleep_hours.or(base.total_sleep_hours),
            deep_sleep_hours: self.deep_sleep_hours.or(base.deep_sleep_hours),
            rem_sleep_hours: self.rem_sleep_hours.or(base.rem_sleep_hours),
            continuity_mode,
            waso_minutes,
            wake_count,
            bedtime_sd_hours: self.bedtime_sd_hours.or(base.bedtime_sd_hours),
            wake_time_sd_hours: self.wake_time_sd_hours.or(base.wake_time_sd_hours),
            device_sleep_score: self.device_sleep_score.or(base.device_sleep_score),
            temperature_c: self.temperature_c.or(base.temperature_c),
            humidity_pct: self.humidity_pct.or(base.humidity_pct),
            screen_hours: self.screen_hours.or(base.screen_hours),
            last_meal_hours: self.last_meal_hours.or(base.last_meal_hours),
            earplugs: self.earplugs.or(base.earplugs),
            streak_days: self.streak_days.or(base.streak_days),
        }
    }

    /// Flatten a resolved input back into a record
    pub fn from_input(input: &RecoveryInput) -> InputRecord {
        let sleep = &input.sleep;
        let env = &input.environment;
        let (waso_minutes, wake_count) = match sleep.continuity {
            Continuity::Waso { minutes } => (Some(minutes), None),
            Continuity::WakeCount { wakes } => (None, Some(wakes)),
        };

        InputRecord {
            total_sleep_hours: Some(sleep.total_sleep_hours),
            deep_sleep_hours: Some(sleep.deep_sleep_hours),
            rem_sleep_hours: Some(sleep.rem_sleep_hours),
            continuity_mode: Some(sleep.continuity.mode()),
            waso_minutes,
            wake_count,
            bedtime_sd_hours: Some(sleep.bedtime_sd_hours),
            wake_time_sd_hours: Some(sleep.wake_time_sd_hours),
            device_sleep_score: Some(sleep.device_sleep_score),
            temperature_c: Some(env.temperature_c),
            humidity_pct: Some(env.humidity_pct),
            screen_hours: Some(env.screen_hours),
            last_meal_hours: Some(env.last_meal_hours),
            earplugs: Some(env.earplugs),
            streak_days: Some(input.streak_days),
        }
    }
}

/// Adapter for converting input records to engine input
pub struct RecordAdapter;

impl RecordAdapter {
    /// Parse a single JSON record
    pub fn parse(json: &str) -> Result<InputRecord, ComputeError> {
        let record: InputRecord = serde_json::from_str(json)?;
        Ok(record)
    }

    /// Parse a JSON array of records
    pub fn parse_array(json: &str) -> Result<Vec<InputRecord>, ComputeError> {
        let records: Vec<InputRecord> = serde_json::from_str(json)?;
        Ok(records)
    }

    /// Parse NDJSON (one record per line, blank lines skipped)
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<InputRecord>, ComputeError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<InputRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(ComputeError::invalid(
                        format!("line {}", line_num + 1),
                        e.to_string(),
                    ));
                }
            }
        }
        Ok(records)
    }

    /// Resolve a record into engine input, filling omitted metrics with defaults
    pub fn to_input(record: &InputRecord) -> Result<RecoveryInput, ComputeError> {
        let sleep_defaults = SleepMetrics::default();
        let env_defaults = EnvironmentMetrics::default();

        let continuity = resolve_continuity(record)?;

        Ok(RecoveryInput {
            sleep: SleepMetrics {
                total_sleep_hours: record
                    .total_sleep_hours
                    .unwrap_or(sleep_defaults.total_sleep_hours),
                deep_sleep_hours: record
                    .deep_sleep_hours
                    .unwrap_or(sleep_defaults.deep_sleep_hours),
                rem_sleep_hours: record
                    .rem_sleep_hours
                    .unwrap_or(sleep_defaults.rem_sleep_hours),
                continuity,
                bedtime_sd_hours: record
                    .bedtime_sd_hours
                    .unwrap_or(sleep_defaults.bedtime_sd_hours),
                wake_time_sd_hours: record
                    .wake_time_sd_hours
                    .unwrap_or(sleep_defaults.wake_time_sd_hours),
                device_sleep_score: record
                    .device_sleep_score
                    .unwrap_or(sleep_defaults.device_sleep_score),
            },
            environment: EnvironmentMetrics {
                temperature_c: record.temperature_c.unwrap_or(env_defaults.temperature_c),
                humidity_pct: record.humidity_pct.unwrap_or(env_defaults.humidity_pct),
                screen_hours: record.screen_hours.unwrap_or(env_defaults.screen_hours),
                last_meal_hours: record
                    .last_meal_hours
                    .unwrap_or(env_defaults.last_meal_hours),
                earplugs: record.earplugs.unwrap_or(env_defaults.earplugs),
            },
            streak_days: record.streak_days.unwrap_or(0),
        })
    }
}

/// Pick the continuity reading selected by the record
fn resolve_continuity(record: &InputRecord) -> Result<Continuity, ComputeError> {
    match (record.continuity_mode, record.waso_minutes, record.wake_count) {
        (Some(ContinuityMode::WasoMinutes), Some(minutes), other) => {
            if other.is_some() {
                tracing::warn!("ignoring wake_count: continuity mode is waso_minutes");
            }
            Ok(Continuity::Waso { minutes })
        }
        (Some(ContinuityMode::WasoMinutes), None, _) => Err(ComputeError::invalid(
            "waso_minutes",
            "required when continuity_mode is waso_minutes",
        )),
        (Some(ContinuityMode::WakeCount), other, Some(wakes)) => {
            if other.is_some() {
                tracing::warn!("ignoring waso_minutes: continuity mode is wake_count");
            }
            Ok(Continuity::WakeCount { wakes })
        }
        (Some(ContinuityMode::WakeCount), _, None) => Err(ComputeError::invalid(
            "wake_count",
            "required when continuity_mode is wake_count",
        )),
        (None, Some(minutes), None) => Ok(Continuity::Waso { minutes }),
        (None, None, Some(wakes)) => Ok(Continuity::WakeCount { wakes }),
        (None, Some(_), Some(_)) => Err(ComputeError::invalid(
            "continuity_mode",
            "both waso_minutes and wake_count supplied; choose one mode",
        )),
        (None, None, None) => Err(ComputeError::invalid(
            "continuity",
            "neither waso_minutes nor wake_count supplied",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_record() {
        let record = RecordAdapter::parse(
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
            }"#,
        )
        .unwrap();

        let input = RecordAdapter::to_input(&record).unwrap();
        assert_eq!(input, RecoveryInput::default());
    }

    #[test]
    fn test_short_aliases() {
        let record =
            RecordAdapter::parse(r#"{"tst": 6.5, "waso": 30, "temp": 19, "screens": 1.5}"#)
                .unwrap();
        let input = RecordAdapter::to_input(&record).unwrap();

        assert_eq!(input.sleep.total_sleep_hours, 6.5);
        assert_eq!(input.sleep.continuity, Continuity::Waso { minutes: 30.0 });
        assert_eq!(input.environment.temperature_c, 19.0);
        assert_eq!(input.environment.screen_hours, 1.5);
    }

    #[test]
    fn test_mode_selects_payload() {
        let record = InputRecord {
            continuity_mode: Some(ContinuityMode::WasoMinutes),
            waso_minutes: Some(35.0),
            wake_count: Some(1),
            ..Default::default()
        };
        let input = RecordAdapter::to_input(&record).unwrap();
        assert_eq!(input.sleep.continuity, Continuity::Waso { minutes: 35.0 });
    }

    #[test]
    fn test_selected_payload_missing() {
        let record = InputRecord {
            continuity_mode: Some(ContinuityMode::WakeCount),
            waso_minutes: Some(35.0),
            ..Default::default()
        };
        let err = RecordAdapter::to_input(&record).unwrap_err();
        assert_eq!(err.field(), Some("wake_count"));
    }

    #[test]
    fn test_neither_continuity_reading() {
        let err = RecordAdapter::to_input(&InputRecord::default()).unwrap_err();
        assert_eq!(err.field(), Some("continuity"));
    }

    #[test]
    fn test_both_readings_without_mode() {
        let record = InputRecord {
            waso_minutes: Some(35.0),
            wake_count: Some(2),
            ..Default::default()
        };
        let err = RecordAdapter::to_input(&record).unwrap_err();
        assert_eq!(err.field(), Some("continuity_mode"));
    }

    #[test]
    fn test_overlay_treats_continuity_as_unit() {
        let base = InputRecord::from_input(&RecoveryInput::default());
        let record = InputRecord {
            waso_minutes: Some(90.0),
            screen_hours: Some(0.5),
            ..Default::default()
        };

        let merged = record.overlay(&base);
        assert_eq!(merged.wake_count, None);
        assert_eq!(merged.continuity_mode, None);
        assert_eq!(merged.screen_hours, Some(0.5));
        assert_eq!(merged.total_sleep_hours, Some(7.8));

        let input = RecordAdapter::to_input(&merged).unwrap();
        assert_eq!(input.sleep.continuity, Continuity::Waso { minutes: 90.0 });
    }

    #[test]
    fn test_from_input_round_trip() {
        let input = RecoveryInput::default();
        let record = InputRecord::from_input(&input);
        assert_eq!(RecordAdapter::to_input(&record).unwrap(), input);
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let ndjson = "{\"wakes\": 1}\n\n{\"wakes\": 2}\nnot json\n";
        let err = RecordAdapter::parse_ndjson(ndjson).unwrap_err();
        assert_eq!(err.field(), Some("line 4"));

        let ok = RecordAdapter::parse_ndjson("{\"wakes\": 1}\n\n{\"waso\": 20}\n").unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            RecordAdapter::parse("not json"),
            Err(ComputeError::JsonError(_))
        ));
    }
}
