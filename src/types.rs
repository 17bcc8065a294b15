//! Core types for the Recovery Flux engine
//!
//! This module defines the data structures that flow through each stage of the
//! engine: raw input metrics, factor scores, modifiers, raw and final indices,
//! and the classified/progression output.

use serde::{Deserialize, Serialize};

/// Which recovery index a computation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Cognitive Recovery Index (CRI)
    Cognitive,
    /// Muscular Recovery Index (MRI)
    Muscular,
}

/// Discriminant of the continuity reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityMode {
    WakeCount,
    WasoMinutes,
}

impl ContinuityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContinuityMode::WakeCount => "wake_count",
            ContinuityMode::WasoMinutes => "waso_minutes",
        }
    }
}

/// Sleep continuity reading: exactly one of the two measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Continuity {
    /// Wake after sleep onset, minutes per night (0-180)
    Waso { minutes: f64 },
    /// Average number of awakenings per night (0-6)
    WakeCount { wakes: u32 },
}

impl Continuity {
    pub fn mode(&self) -> ContinuityMode {
        match self {
            Continuity::Waso { .. } => ContinuityMode::WasoMinutes,
            Continuity::WakeCount { .. } => ContinuityMode::WakeCount,
        }
    }
}

/// Weekly-averaged sleep metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepMetrics {
    /// Total sleep time (hours, 4-10)
    pub total_sleep_hours: f64,
    /// Slow-wave (deep) sleep time (hours, 0.3-3)
    pub deep_sleep_hours: f64,
    /// REM sleep time (hours, 0.3-3)
    pub rem_sleep_hours: f64,
    /// Continuity reading
    pub continuity: Continuity,
    /// Bedtime variability, standard deviation (hours, 0-3)
    pub bedtime_sd_hours: f64,
    /// Wake-time variability, standard deviation (hours, 0-3)
    pub wake_time_sd_hours: f64,
    /// External device sleep-quality score (0-100)
    pub device_sleep_score: f64,
}

impl Default for SleepMetrics {
    fn default() -> Self {
        Self {
            total_sleep_hours: 7.8,
            deep_sleep_hours: 1.6,
            rem_sleep_hours: 1.8,
            continuity: Continuity::WakeCount { wakes: 1 },
            bedtime_sd_hours: 0.6,
            wake_time_sd_hours: 0.7,
            device_sleep_score: 82.0,
        }
    }
}

/// Bedroom environment and evening habits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentMetrics {
    /// Bedroom temperature (celsius, 15-30)
    pub temperature_c: f64,
    /// Relative humidity (percent, 20-80)
    pub humidity_pct: f64,
    /// Screen time after 9 PM (hours, 0-4)
    pub screen_hours: f64,
    /// Hours between the last meal and bedtime (0-5)
    pub last_meal_hours: f64,
    /// Earplugs worn (0, 1 or 2)
    pub earplugs: u8,
}

impl Default for EnvironmentMetrics {
    fn default() -> Self {
        Self {
            temperature_c: 23.0,
            humidity_pct: 50.0,
            screen_hours: 0.8,
            last_meal_hours: 2.0,
            earplugs: 0,
        }
    }
}

/// Complete input vector for one engine invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryInput {
    pub sleep: SleepMetrics,
    pub environment: EnvironmentMetrics,
    /// Consecutive tracked days, supplied by the caller (0-365)
    #[serde(default)]
    pub streak_days: u32,
}

/// A field outside its documented input range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeViolation {
    pub field: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Bounded factor scores produced by the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    /// Sleep quantity (0.4-1.0)
    pub qty: f64,
    /// Deep sleep (0.2-1.15)
    pub sws: f64,
    /// REM sleep (0.2-1.10)
    pub rem: f64,
    /// Continuity (0.70-1.00)
    pub cont: f64,
    /// Regularity (0.5-1.0)
    pub reg: f64,
}

/// Multiplicative modifiers derived from the environment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModifierSet {
    pub screens_penalty: f64,
    pub temp_bonus: f64,
    pub rh_bonus: f64,
    /// Applied to the muscular index only
    pub earplug_bonus: f64,
    pub meal_bonus: f64,
}

/// Indices before soft-capping; may exceed 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawIndex {
    pub gm_cog: f64,
    pub gm_musc: f64,
    pub cri_raw: f64,
    pub mri_raw: f64,
}

/// Final percentages in [0, 100], rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalIndex {
    pub cri: f64,
    pub mri: f64,
    pub overall: f64,
}

/// Ordered score tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// Headline gauge band (good / fair / poor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Poor,
    Fair,
    Good,
}

/// Tier per index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSet {
    pub cri: Tier,
    pub mri: Tier,
    pub overall: Tier,
}

/// Gauge band per index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeSet {
    pub cri: GaugeBand,
    pub mri: GaugeBand,
    pub overall: GaugeBand,
}

/// Progression level, ordered by XP band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "level_1")]
    Level1,
    #[serde(rename = "level_2")]
    Level2,
    #[serde(rename = "level_3")]
    Level3,
    #[serde(rename = "level_4")]
    Level4,
    #[serde(rename = "level_5")]
    Level5,
}

/// Habit condition that grants bonus XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quest {
    /// Bedtime and wake-time SD both at most 1 hour
    ConsistentSchedule,
    /// At most 45 minutes of screens after 9 PM
    ScreenCurfew,
    /// Temperature and humidity both in their ideal bands
    IdealBedroom,
    /// Last meal at least 2 hours before bed
    EarlyDinner,
}

/// XP and level derived from one input snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub xp: u32,
    pub level: Level,
    pub streak_days: u32,
    /// Quests completed by this snapshot, in evaluation order
    pub quests: Vec<Quest>,
}

/// Intermediate values exposed for diagnostic display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub continuity_mode: ContinuityMode,
    pub factors: FactorScores,
    pub modifiers: ModifierSet,
    pub raw: RawIndex,
    /// Device sleep score mapped to [0.5, 1.0]
    pub watch_scaled: f64,
}

/// Complete engine output for one input snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScores {
    pub cri: f64,
    pub mri: f64,
    pub overall: f64,
    pub tiers: TierSet,
    pub gauges: GaugeSet,
    pub progression: ProgressionState,
    /// Present on engine output; reports may drop it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// Category of a targeted suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    SleepDuration,
    DeepSleep,
    RemSleep,
    Fragmentation,
    Regularity,
    Temperature,
    Humidity,
    Screens,
}

/// Actionable advice derived from the raw inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub input: RecoveryInput,
    pub scores: RecoveryScores,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}
