//! Input contract checks
//!
//! The engine only rejects values it cannot compute with (NaN, infinities).
//! Range checks against the documented input contract are separate so callers
//! can decide whether to refuse or merely report out-of-range input.

use crate::error::ComputeError;
use crate::types::{Continuity, RangeViolation, RecoveryInput};

/// A checked field: name, value and inclusive range
type FieldSpec = (&'static str, f64, f64, f64);

impl RecoveryInput {
    fn field_specs(&self) -> Vec<FieldSpec> {
        let sleep = &self.sleep;
        let env = &self.environment;

        let mut specs = vec![
            ("total_sleep_hours", sleep.total_sleep_hours, 4.0, 10.0),
            ("deep_sleep_hours", sleep.deep_sleep_hours, 0.3, 3.0),
            ("rem_sleep_hours", sleep.rem_sleep_hours, 0.3, 3.0),
        ];

        match sleep.continuity {
            Continuity::Waso { minutes } => specs.push(("waso_minutes", minutes, 0.0, 180.0)),
            Continuity::WakeCount { wakes } => {
                specs.push(("wake_count", f64::from(wakes), 0.0, 6.0))
            }
        }

        specs.extend([
            ("bedtime_sd_hours", sleep.bedtime_sd_hours, 0.0, 3.0),
            ("wake_time_sd_hours", sleep.wake_time_sd_hours, 0.0, 3.0),
            ("device_sleep_score", sleep.device_sleep_score, 0.0, 100.0),
            ("temperature_c", env.temperature_c, 15.0, 30.0),
            ("humidity_pct", env.humidity_pct, 20.0, 80.0),
            ("screen_hours", env.screen_hours, 0.0, 4.0),
            ("last_meal_hours", env.last_meal_hours, 0.0, 5.0),
            ("earplugs", f64::from(env.earplugs), 0.0, 2.0),
            ("streak_days", f64::from(self.streak_days), 0.0, 365.0),
        ]);

        specs
    }

    /// Reject values the engine cannot compute with
    pub fn ensure_finite(&self) -> Result<(), ComputeError> {
        match self
            .field_specs()
            .into_iter()
            .find(|(_, value, _, _)| !value.is_finite())
        {
            Some((field, value, _, _)) => {
                Err(ComputeError::invalid(field, format!("value {value} is not finite")))
            }
            None => Ok(()),
        }
    }

    /// Every field outside its documented range
    pub fn validate(&self) -> Vec<RangeViolation> {
        self.field_specs()
            .into_iter()
            .filter(|(_, value, min, max)| !(*min..=*max).contains(value))
            .map(|(field, value, min, max)| RangeViolation {
                field: field.to_string(),
                value,
                min,
                max,
            })
            .collect()
    }

    /// Fail on the first out-of-contract field
    pub fn check_contract(&self) -> Result<(), ComputeError> {
        self.ensure_finite()?;
        match self.validate().into_iter().next() {
            Some(violation) => Err(ComputeError::invalid(
                violation.field,
                format!(
                    "value {} outside [{}, {}]",
                    violation.value, violation.min, violation.max
                ),
            )),
            None => Ok(()),
        }
    }
}
