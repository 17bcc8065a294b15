//! Environment modifier chain
//!
//! Each modifier is a multiplier derived from the bedroom environment or evening
//! habits. The chain is an ordered list of rules folded over the geometric mean
//! of an index. Rules carry the set of indices they apply to: the earplug bonus
//! only feeds the muscular index.

use crate::types::{EnvironmentMetrics, IndexKind, ModifierSet};
use serde::{Deserialize, Serialize};

/// Screen hours beyond which no further penalty accrues
const SCREENS_SATURATION_HOURS: f64 = 3.0;
const PENALTY_PER_SCREEN_HOUR: f64 = 0.04;

/// Ideal bedroom temperature band (celsius, inclusive)
pub const IDEAL_TEMPERATURE_C: (f64, f64) = (20.0, 25.0);
/// Ideal relative humidity band (percent, inclusive)
pub const IDEAL_HUMIDITY_PCT: (f64, f64) = (40.0, 60.0);
/// Minimum gap between last meal and bedtime (hours)
pub const EARLY_MEAL_HOURS: f64 = 2.0;

const TEMP_BONUS: f64 = 1.05;
const RH_BONUS: f64 = 1.03;
const EARPLUG_BONUS: f64 = 1.02;
const MEAL_BONUS: f64 = 1.02;
const LATE_MEAL_PENALTY: f64 = 0.99;

/// Identifier of a modifier in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    ScreensPenalty,
    TempBonus,
    RhBonus,
    EarplugBonus,
    MealBonus,
}

/// How a rule turns the environment into a factor
#[derive(Clone, Copy)]
pub enum ModifierEffect {
    /// `met` when the predicate holds, `otherwise` when it does not
    Gate {
        predicate: fn(&EnvironmentMetrics) -> bool,
        met: f64,
        otherwise: f64,
    },
    /// Continuous factor computed directly from the environment
    Scale(fn(&EnvironmentMetrics) -> f64),
}

/// A single link of the modifier chain
#[derive(Clone, Copy)]
pub struct ModifierRule {
    pub kind: ModifierKind,
    pub effect: ModifierEffect,
    /// Whether the rule feeds the cognitive index
    pub cognitive: bool,
    /// Whether the rule feeds the muscular index
    pub muscular: bool,
}

impl ModifierRule {
    /// Multiplier this rule contributes for the given environment
    pub fn factor(&self, env: &EnvironmentMetrics) -> f64 {
        match self.effect {
            ModifierEffect::Gate {
                predicate,
                met,
                otherwise,
            } => {
                if predicate(env) {
                    met
                } else {
                    otherwise
                }
            }
            ModifierEffect::Scale(compute) => compute(env),
        }
    }

    pub fn applies_to(&self, kind: IndexKind) -> bool {
        match kind {
            IndexKind::Cognitive => self.cognitive,
            IndexKind::Muscular => self.muscular,
        }
    }
}

/// The standard chain, in application order
pub const MODIFIER_CHAIN: [ModifierRule; 5] = [
    ModifierRule {
        kind: ModifierKind::ScreensPenalty,
        effect: ModifierEffect::Scale(|env| screens_penalty(env.screen_hours)),
        cognitive: true,
        muscular: true,
    },
    ModifierRule {
        kind: ModifierKind::TempBonus,
        effect: ModifierEffect::Gate {
            predicate: |env| temperature_is_ideal(env.temperature_c),
            met: TEMP_BONUS,
            otherwise: 1.0,
        },
        cognitive: true,
        muscular: true,
    },
    ModifierRule {
        kind: ModifierKind::RhBonus,
        effect: ModifierEffect::Gate {
            predicate: |env| humidity_is_ideal(env.humidity_pct),
            met: RH_BONUS,
            otherwise: 1.0,
        },
        cognitive: true,
        muscular: true,
    },
    ModifierRule {
        kind: ModifierKind::EarplugBonus,
        effect: ModifierEffect::Gate {
            predicate: |env| env.earplugs >= 1,
            met: EARPLUG_BONUS,
            otherwise: 1.0,
        },
        cognitive: false,
        muscular: true,
    },
    ModifierRule {
        kind: ModifierKind::MealBonus,
        effect: ModifierEffect::Gate {
            predicate: |env| env.last_meal_hours >= EARLY_MEAL_HOURS,
            met: MEAL_BONUS,
            otherwise: LATE_MEAL_PENALTY,
        },
        cognitive: true,
        muscular: true,
    },
];

/// Penalty for screen time after 9 PM, up to -12%
pub fn screens_penalty(screen_hours: f64) -> f64 {
    1.0 - screen_hours.clamp(0.0, SCREENS_SATURATION_HOURS) * PENALTY_PER_SCREEN_HOUR
}

pub fn temperature_is_ideal(temperature_c: f64) -> bool {
    (IDEAL_TEMPERATURE_C.0..=IDEAL_TEMPERATURE_C.1).contains(&temperature_c)
}

pub fn humidity_is_ideal(humidity_pct: f64) -> bool {
    (IDEAL_HUMIDITY_PCT.0..=IDEAL_HUMIDITY_PCT.1).contains(&humidity_pct)
}

/// Fold the chain over a geometric mean for one index
pub fn apply_chain(gm: f64, env: &EnvironmentMetrics, kind: IndexKind) -> f64 {
    MODIFIER_CHAIN
        .iter()
        .filter(|rule| rule.applies_to(kind))
        .fold(gm, |acc, rule| acc * rule.factor(env))
}

impl ModifierSet {
    /// Evaluate every modifier for diagnostic display
    pub fn from_environment(env: &EnvironmentMetrics) -> Self {
        let mut set = ModifierSet {
            screens_penalty: 1.0,
            temp_bonus: 1.0,
            rh_bonus: 1.0,
            earplug_bonus: 1.0,
            meal_bonus: 1.0,
        };

        for rule in &MODIFIER_CHAIN {
            let factor = rule.factor(env);
            match rule.kind {
                ModifierKind::ScreensPenalty => set.screens_penalty = factor,
                ModifierKind::TempBonus => set.temp_bonus = factor,
                ModifierKind::RhBonus => set.rh_bonus = factor,
                ModifierKind::EarplugBonus => set.earplug_bonus = factor,
                ModifierKind::MealBonus => set.meal_bonus = factor,
            }
        }

        set
    }
}
