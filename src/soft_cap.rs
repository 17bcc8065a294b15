//! Soft-cap combination
//!
//! Raw indices are a product of capped bonuses and can drift above 1.0. They are
//! anchored against the device sleep score with a harmonic mean, which keeps the
//! lower of the two inputs influential, then clamped and scaled to a percentage.

use crate::types::FinalIndex;

/// Upper clamp applied to a raw index before blending
const RAW_CEILING: f64 = 1.5;
/// Range of the scaled device score
const WATCH_FLOOR: f64 = 0.5;
const WATCH_CEILING: f64 = 1.0;
/// Guard for reciprocals
const EPSILON: f64 = 1e-9;

/// Overall index blend weights
pub const OVERALL_CRI_WEIGHT: f64 = 0.45;
pub const OVERALL_MRI_WEIGHT: f64 = 0.55;

/// Map a 0-100 device score into [0.5, 1.0]
pub fn scaled_watch(device_sleep_score: f64) -> f64 {
    WATCH_FLOOR + WATCH_FLOOR * (device_sleep_score / 100.0)
}

/// Harmonic mean of the clamped raw index and scaled device score
pub fn soft_cap(raw: f64, watch_scaled: f64) -> f64 {
    let raw = raw.clamp(0.0, RAW_CEILING);
    let watch = watch_scaled.clamp(WATCH_FLOOR, WATCH_CEILING);
    2.0 / (1.0 / raw.max(EPSILON) + 1.0 / watch.max(EPSILON))
}

/// Round to one decimal place, deciding on the exact stored value
///
/// Scaling by ten first can turn 56.0499... into the tie 560.5, so the
/// decision is made by exact decimal formatting instead. Exact ties round
/// half to even.
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Final 0-100 percentage for one raw index
pub fn finalize(raw: f64, watch_scaled: f64) -> f64 {
    round1(soft_cap(raw, watch_scaled).clamp(0.0, 1.0) * 100.0)
}

/// Weighted blend of the two final indices
pub fn overall(cri: f64, mri: f64) -> f64 {
    round1(cri * OVERALL_CRI_WEIGHT + mri * OVERALL_MRI_WEIGHT)
}

/// Soft-cap both raw indices against the device score
pub fn combine(cri_raw: f64, mri_raw: f64, device_sleep_score: f64) -> FinalIndex {
    let watch = scaled_watch(device_sleep_score);
    let cri = finalize(cri_raw, watch);
    let mri = finalize(mri_raw, watch);

    FinalIndex {
        cri,
        mri,
        overall: overall(cri, mri),
    }
}
