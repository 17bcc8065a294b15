//! XP and level progression
//!
//! XP rewards score above 60, a soft-capped day streak and a set of habit
//! quests evaluated on the raw inputs. Levels are fixed XP bands.

use crate::modifiers::{humidity_is_ideal, temperature_is_ideal, EARLY_MEAL_HOURS};
use crate::types::{FinalIndex, Level, ProgressionState, Quest, RecoveryInput};

/// Score above which XP accrues
const XP_SCORE_FLOOR: f64 = 60.0;
const XP_PER_POINT: f64 = 0.8;

/// Streak days beyond which no further bonus accrues
const STREAK_CAP_DAYS: u32 = 30;
const XP_PER_STREAK_DAY: f64 = 2.5;

const MAX_SCHEDULE_SD_HOURS: f64 = 1.0;
const SCREEN_CURFEW_HOURS: f64 = 0.75;

/// Level lower bounds in XP, highest first
pub const LEVEL_THRESHOLDS: [(u32, Level); 4] = [
    (180, Level::Level5),
    (130, Level::Level4),
    (90, Level::Level3),
    (60, Level::Level2),
];

impl Level {
    pub fn from_xp(xp: u32) -> Level {
        LEVEL_THRESHOLDS
            .iter()
            .find(|(min, _)| xp >= *min)
            .map(|(_, level)| *level)
            .unwrap_or(Level::Level1)
    }

    pub fn number(&self) -> u8 {
        match self {
            Level::Level1 => 1,
            Level::Level2 => 2,
            Level::Level3 => 3,
            Level::Level4 => 4,
            Level::Level5 => 5,
        }
    }
}

impl Quest {
    pub fn reward(&self) -> u32 {
        match self {
            Quest::ConsistentSchedule => 10,
            Quest::ScreenCurfew => 10,
            Quest::IdealBedroom => 10,
            Quest::EarlyDinner => 5,
        }
    }

    /// Whether this snapshot completes the quest
    pub fn is_complete(&self, input: &RecoveryInput) -> bool {
        let sleep = &input.sleep;
        let env = &input.environment;
        match self {
            Quest::ConsistentSchedule => {
                sleep.bedtime_sd_hours <= MAX_SCHEDULE_SD_HOURS
                    && sleep.wake_time_sd_hours <= MAX_SCHEDULE_SD_HOURS
            }
            Quest::ScreenCurfew => env.screen_hours <= SCREEN_CURFEW_HOURS,
            Quest::IdealBedroom => {
                temperature_is_ideal(env.temperature_c) && humidity_is_ideal(env.humidity_pct)
            }
            Quest::EarlyDinner => env.last_meal_hours >= EARLY_MEAL_HOURS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quest::ConsistentSchedule => "consistent_schedule",
            Quest::ScreenCurfew => "screen_curfew",
            Quest::IdealBedroom => "ideal_bedroom",
            Quest::EarlyDinner => "early_dinner",
        }
    }

    pub fn all() -> [Quest; 4] {
        [
            Quest::ConsistentSchedule,
            Quest::ScreenCurfew,
            Quest::IdealBedroom,
            Quest::EarlyDinner,
        ]
    }
}

/// XP earned from scores above the floor
pub fn score_xp(index: &FinalIndex) -> f64 {
    ((index.cri - XP_SCORE_FLOOR).max(0.0) + (index.mri - XP_SCORE_FLOOR).max(0.0)) * XP_PER_POINT
}

pub fn streak_xp(streak_days: u32) -> f64 {
    f64::from(streak_days.min(STREAK_CAP_DAYS)) * XP_PER_STREAK_DAY
}

/// Derive XP, level and completed quests for one snapshot
pub fn progress(index: &FinalIndex, input: &RecoveryInput) -> ProgressionState {
    let quests: Vec<Quest> = Quest::all()
        .into_iter()
        .filter(|quest| quest.is_complete(input))
        .collect();
    let quest_xp: u32 = quests.iter().map(Quest::reward).sum();

    let total = score_xp(index) + streak_xp(input.streak_days) + f64::from(quest_xp);
    // Non-negative by construction; the cast saturates
    let xp = total.floor() as u32;

    ProgressionState {
        xp,
        level: Level::from_xp(xp),
        streak_days: input.streak_days,
        quests,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EnvironmentMetrics, SleepMetrics};
    use pretty_assertions::assert_eq;

    fn index(cri: f64, mri: f64) -> FinalIndex {
        FinalIndex {
            cri,
            mri,
            overall: 0.0,
        }
    }

    fn no_quest_input() -> RecoveryInput {
        RecoveryInput {
            sleep: SleepMetrics {
                bedtime_sd_hours: 2.0,
                ..Default::default()
            },
            environment: EnvironmentMetrics {
                temperature_c: 28.0,
                screen_hours: 2.0,
                last_meal_hours: 1.0,
                ..Default::default()
            },
            streak_days: 0,
        }
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(Level::from_xp(0), Level::Level1);
        assert_eq!(Level::from_xp(59), Level::Level1);
        assert_eq!(Level::from_xp(60), Level::Level2);
        assert_eq!(Level::from_xp(90), Level::Level3);
        assert_eq!(Level::from_xp(130), Level::Level4);
        assert_eq!(Level::from_xp(179), Level::Level4);
        assert_eq!(Level::from_xp(180), Level::Level5);
    }

    #[test]
    fn test_only_score_above_sixty_counts() {
        assert_eq!(score_xp(&index(50.0, 40.0)), 0.0);
        assert!((score_xp(&index(70.0, 50.0)) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_streak_is_capped() {
        assert_eq!(streak_xp(10), 25.0);
        assert_eq!(streak_xp(30), 75.0);
        assert_eq!(streak_xp(365), 75.0);
    }

    #[test]
    fn test_default_quests() {
        let state = progress(&index(94.7, 94.6), &RecoveryInput::default());
        // Screens 0.8h misses the curfew
        assert_eq!(
            state.quests,
            vec![
                Quest::ConsistentSchedule,
                Quest::IdealBedroom,
                Quest::EarlyDinner
            ]
        );
        // (34.7 + 34.6) * 0.8 = 55.44, + 25 quest XP
        assert_eq!(state.xp, 80);
        assert_eq!(state.level, Level::Level2);
    }

    #[test]
    fn test_no_quests_no_streak() {
        let state = progress(&index(60.0, 60.0), &no_quest_input());
        assert!(state.quests.is_empty());
        assert_eq!(state.xp, 0);
        assert_eq!(state.level, Level::Level1);
    }

    #[test]
    fn test_max_progression() {
        let input = RecoveryInput {
            environment: EnvironmentMetrics {
                screen_hours: 0.5,
                ..Default::default()
            },
            streak_days: 45,
            ..Default::default()
        };
        let state = progress(&index(100.0, 100.0), &input);
        // 64 + 75 + 35
        assert_eq!(state.xp, 174);
        assert_eq!(state.level, Level::Level4);
        assert_eq!(state.streak_days, 45);
    }

    #[test]
    fn test_screen_curfew_boundary() {
        let mut input = no_quest_input();
        input.environment.screen_hours = 0.75;
        assert!(Quest::ScreenCurfew.is_complete(&input));
        input.environment.screen_hours = 0.8;
        assert!(!Quest::ScreenCurfew.is_complete(&input));
    }
}
