//! Targeted suggestions
//!
//! Rule-based advice derived from the raw inputs. Each rule checks one metric
//! against a healthy range and, when it falls outside, emits a suggestion.
//! Rules are evaluated in a fixed order so output is stable.

use crate::modifiers::{humidity_is_ideal, temperature_is_ideal};
use crate::types::{Continuity, RecoveryInput, Suggestion, SuggestionKind};

const MIN_SLEEP_HOURS: f64 = 7.0;
const MAX_SLEEP_HOURS: f64 = 9.5;
const MIN_DEEP_SLEEP_HOURS: f64 = 1.3;
const MIN_REM_HOURS: f64 = 1.5;
const MAX_WASO_MINUTES: f64 = 45.0;
const MAX_WAKES: u32 = 2;
const MAX_SCHEDULE_SD_HOURS: f64 = 1.0;
const MAX_SCREEN_HOURS: f64 = 1.0;

/// Evaluate every rule and collect triggered suggestions
pub fn suggest(input: &RecoveryInput) -> Vec<Suggestion> {
    let sleep = &input.sleep;
    let env = &input.environment;

    let fragmented = match sleep.continuity {
        Continuity::Waso { minutes } => minutes > MAX_WASO_MINUTES,
        Continuity::WakeCount { wakes } => wakes > MAX_WAKES,
    };

    let rules = [
        (
            sleep.total_sleep_hours < MIN_SLEEP_HOURS || sleep.total_sleep_hours > MAX_SLEEP_HOURS,
            SuggestionKind::SleepDuration,
        ),
        (
            sleep.deep_sleep_hours < MIN_DEEP_SLEEP_HOURS,
            SuggestionKind::DeepSleep,
        ),
        (sleep.rem_sleep_hours < MIN_REM_HOURS, SuggestionKind::RemSleep),
        (fragmented, SuggestionKind::Fragmentation),
        (
            sleep.bedtime_sd_hours > MAX_SCHEDULE_SD_HOURS
                || sleep.wake_time_sd_hours > MAX_SCHEDULE_SD_HOURS,
            SuggestionKind::Regularity,
        ),
        (
            !temperature_is_ideal(env.temperature_c),
            SuggestionKind::Temperature,
        ),
        (!humidity_is_ideal(env.humidity_pct), SuggestionKind::Humidity),
        (env.screen_hours > MAX_SCREEN_HOURS, SuggestionKind::Screens),
    ];

    rules
        .into_iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, kind)| Suggestion {
            kind,
            message: kind.message().to_string(),
        })
        .collect()
}

impl SuggestionKind {
    pub fn message(&self) -> &'static str {
        match self {
            SuggestionKind::SleepDuration => {
                "Keep weekly average sleep close to 8h; big deviations reduce CRI/MRI."
            }
            SuggestionKind::DeepSleep => {
                "Aim for at least 1.5h of deep sleep; a cool, dark, quiet bedroom helps."
            }
            SuggestionKind::RemSleep => {
                "Push REM up by improving sleep continuity and reducing late screens."
            }
            SuggestionKind::Fragmentation => {
                "Reduce fragmentation with noise/light control and a wind-down routine."
            }
            SuggestionKind::Regularity => {
                "Tighten regularity: keep bed and wake times within about 1h day to day."
            }
            SuggestionKind::Temperature => "Keep the room at 20-25°C to support sleep efficiency.",
            SuggestionKind::Humidity => "Keep humidity around 40-60% if possible.",
            SuggestionKind::Screens => {
                "Limit screens after 9 PM or use stronger blue-light blocking."
            }
        }
    }
}
