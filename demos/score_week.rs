//! Score a sample week for manual inspection

fn main() {
    let json = r#"{
        "tst": 6.9,
        "sws": 1.2,
        "rem": 1.6,
        "continuity_mode": "waso_minutes",
        "waso": 42,
        "bt_sd": 1.1,
        "wu_sd": 0.8,
        "sleep_score": 74,
        "temp": 24,
        "rh": 38,
        "screens": 1.5,
        "last_meal": 2.5,
        "earplugs": 1,
        "streak_days": 12
    }"#;

    match recovery_flux::recovery_from_json(json.to_string()) {
        Ok(report) => print!("{report}"),
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
