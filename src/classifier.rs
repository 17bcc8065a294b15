//! Score classification
//!
//! Maps 0-100 scores to ordered tiers and to the good/fair/poor gauge bands.
//! Thresholds are closed lower bounds checked from the top.

use crate::types::{FinalIndex, GaugeBand, GaugeSet, Tier, TierSet};

/// Tier lower bounds, highest first
pub const TIER_THRESHOLDS: [(f64, Tier); 4] = [
    (92.0, Tier::Diamond),
    (85.0, Tier::Platinum),
    (78.0, Tier::Gold),
    (68.0, Tier::Silver),
];

const GOOD_GAUGE_MIN: f64 = 80.0;
const FAIR_GAUGE_MIN: f64 = 65.0;

impl Tier {
    /// Classify a 0-100 score
    pub fn from_score(score: f64) -> Tier {
        TIER_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::Bronze)
    }

    /// Inclusive lower bound of this tier
    pub fn min_score(&self) -> f64 {
        TIER_THRESHOLDS
            .iter()
            .find(|(_, tier)| tier == self)
            .map(|(min, _)| *min)
            .unwrap_or(0.0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
        }
    }

    /// All tiers in ascending order
    pub fn all() -> [Tier; 5] {
        [
            Tier::Bronze,
            Tier::Silver,
            Tier::Gold,
            Tier::Platinum,
            Tier::Diamond,
        ]
    }
}

impl GaugeBand {
    pub fn from_score(score: f64) -> GaugeBand {
        if score >= GOOD_GAUGE_MIN {
            GaugeBand::Good
        } else if score >= FAIR_GAUGE_MIN {
            GaugeBand::Fair
        } else {
            GaugeBand::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GaugeBand::Good => "good",
            GaugeBand::Fair => "fair",
            GaugeBand::Poor => "poor",
        }
    }
}

/// Classify every index independently
pub fn classify(index: &FinalIndex) -> TierSet {
    TierSet {
        cri: Tier::from_score(index.cri),
        mri: Tier::from_score(index.mri),
        overall: Tier::from_score(index.overall),
    }
}

/// Gauge band for every index
pub fn gauges(index: &FinalIndex) -> GaugeSet {
    GaugeSet {
        cri: GaugeBand::from_score(index.cri),
        mri: GaugeBand::from_score(index.mri),
        overall: GaugeBand::from_score(index.overall),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tier_boundaries_are_closed() {
        assert_eq!(Tier::from_score(91.99), Tier::Platinum);
        assert_eq!(Tier::from_score(92.0), Tier::Diamond);
        assert_eq!(Tier::from_score(85.0), Tier::Platinum);
        assert_eq!(Tier::from_score(84.9), Tier::Gold);
        assert_eq!(Tier::from_score(78.0), Tier::Gold);
        assert_eq!(Tier::from_score(68.0), Tier::Silver);
        assert_eq!(Tier::from_score(67.9), Tier::Bronze);
        assert_eq!(Tier::from_score(0.0), Tier::Bronze);
        assert_eq!(Tier::from_score(100.0), Tier::Diamond);
    }

    #[test]
    fn test_tiers_are_ordered() {
        let tiers = Tier::all();
        assert!(tiers.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(tiers
            .windows(2)
            .all(|pair| pair[0].min_score() < pair[1].min_score()));
    }

    #[test]
    fn test_classification_is_monotonic() {
        let mut previous = Tier::Bronze;
        for tenth in 0..=1000 {
            let tier = Tier::from_score(tenth as f64 / 10.0);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn test_gauge_bands() {
        assert_eq!(GaugeBand::from_score(80.0), GaugeBand::Good);
        assert_eq!(GaugeBand::from_score(79.9), GaugeBand::Fair);
        assert_eq!(GaugeBand::from_score(65.0), GaugeBand::Fair);
        assert_eq!(GaugeBand::from_score(64.9), GaugeBand::Poor);
    }

    #[test]
    fn test_classify_each_index_independently() {
        let index = FinalIndex {
            cri: 93.0,
            mri: 70.0,
            overall: 80.0,
        };
        assert_eq!(
            classify(&index),
            TierSet {
                cri: Tier::Diamond,
                mri: Tier::Silver,
                overall: Tier::Gold,
            }
        );
        assert_eq!(gauges(&index).mri, GaugeBand::Fair);
    }
}
