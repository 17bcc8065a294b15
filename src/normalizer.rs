//! Factor normalization
//!
//! This module converts raw sleep metrics into bounded factor scores:
//! - Quantity: Gaussian around 8 hours, floored so long/short weeks are not crushed
//! - Architecture (deep sleep, REM): ratio to a reference with a small capped bonus
//! - Continuity: linear penalty on WASO minutes or wake count
//! - Regularity: bivariate Gaussian decay on bedtime/wake-time variability

use crate::types::{Continuity, FactorScores, SleepMetrics};

/// Optimal weekly-average sleep duration (hours)
const QTY_CENTER_HOURS: f64 = 8.0;
const QTY_SIGMA_HOURS: f64 = 1.0;
const QTY_FLOOR: f64 = 0.4;

/// Reference deep sleep duration (hours)
const SWS_REFERENCE_HOURS: f64 = 1.6;
const SWS_FLOOR: f64 = 0.2;
const SWS_CAP: f64 = 1.15;

/// Reference REM duration (hours)
const REM_REFERENCE_HOURS: f64 = 1.8;
const REM_FLOOR: f64 = 0.2;
const REM_CAP: f64 = 1.10;

/// WASO minutes beyond which no further penalty accrues
const WASO_SATURATION_MIN: f64 = 90.0;
const WASO_SCALE_MIN: f64 = 300.0;

/// Wake count beyond which no further penalty accrues
const WAKES_SATURATION: u32 = 5;
const PENALTY_PER_WAKE: f64 = 0.06;

const CONT_FLOOR: f64 = 0.70;
const REG_FLOOR: f64 = 0.5;

/// Normalizer for converting raw sleep metrics to factor scores
pub struct Normalizer;

impl Normalizer {
    /// Normalize all five factors
    pub fn normalize(sleep: &SleepMetrics) -> FactorScores {
        let factors = FactorScores {
            qty: quantity_factor(sleep.total_sleep_hours),
            sws: deep_sleep_factor(sleep.deep_sleep_hours),
            rem: rem_factor(sleep.rem_sleep_hours),
            cont: continuity_factor(&sleep.continuity),
            reg: regularity_factor(sleep.bedtime_sd_hours, sleep.wake_time_sd_hours),
        };

        tracing::debug!(
            qty = factors.qty,
            sws = factors.sws,
            rem = factors.rem,
            cont = factors.cont,
            reg = factors.reg,
            "normalized sleep factors"
        );

        factors
    }
}

/// Sleep quantity factor, maximal at 8 hours
pub fn quantity_factor(total_sleep_hours: f64) -> f64 {
    let z = (total_sleep_hours - QTY_CENTER_HOURS) / QTY_SIGMA_HOURS;
    (-0.5 * z * z).exp().clamp(QTY_FLOOR, 1.0)
}

/// Deep sleep factor, up to +15% bonus above the reference
pub fn deep_sleep_factor(deep_sleep_hours: f64) -> f64 {
    (deep_sleep_hours / SWS_REFERENCE_HOURS).clamp(SWS_FLOOR, SWS_CAP)
}

/// REM factor, up to +10% bonus above the reference
pub fn rem_factor(rem_sleep_hours: f64) -> f64 {
    (rem_sleep_hours / REM_REFERENCE_HOURS).clamp(REM_FLOOR, REM_CAP)
}

/// Continuity factor for whichever reading is present
pub fn continuity_factor(continuity: &Continuity) -> f64 {
    let value = match *continuity {
        Continuity::Waso { minutes } => {
            1.0 - minutes.clamp(0.0, WASO_SATURATION_MIN) / WASO_SCALE_MIN
        }
        Continuity::WakeCount { wakes } => {
            1.0 - f64::from(wakes.min(WAKES_SATURATION)) * PENALTY_PER_WAKE
        }
    };
    value.clamp(CONT_FLOOR, 1.0)
}

/// Regularity factor from bedtime and wake-time standard deviations
pub fn regularity_factor(bedtime_sd_hours: f64, wake_time_sd_hours: f64) -> f64 {
    let spread = bedtime_sd_hours.powi(2) + wake_time_sd_hours.powi(2);
    (-spread / 2.0).exp().clamp(REG_FLOOR, 1.0)
}
