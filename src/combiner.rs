//! Index combination
//!
//! Factor scores are combined with a weighted geometric mean so that a single
//! collapsing factor drags the whole index down multiplicatively. The cognitive
//! index weights REM higher; the muscular index weights deep sleep and quantity
//! higher.

use crate::types::{FactorScores, IndexKind};

/// Exponents of the weighted geometric mean; they sum to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexWeights {
    pub qty: f64,
    pub sws: f64,
    pub rem: f64,
    pub cont: f64,
    pub reg: f64,
}

impl IndexWeights {
    /// Cognitive Recovery Index weights
    pub const COGNITIVE: IndexWeights = IndexWeights {
        qty: 0.30,
        sws: 0.15,
        rem: 0.25,
        cont: 0.15,
        reg: 0.15,
    };

    /// Muscular Recovery Index weights
    pub const MUSCULAR: IndexWeights = IndexWeights {
        qty: 0.35,
        sws: 0.25,
        rem: 0.10,
        cont: 0.15,
        reg: 0.15,
    };

    pub fn for_index(kind: IndexKind) -> IndexWeights {
        match kind {
            IndexKind::Cognitive => Self::COGNITIVE,
            IndexKind::Muscular => Self::MUSCULAR,
        }
    }

    pub fn total(&self) -> f64 {
        self.qty + self.sws + self.rem + self.cont + self.reg
    }
}

/// Weighted geometric mean of the factor scores
pub fn weighted_geometric_mean(factors: &FactorScores, weights: &IndexWeights) -> f64 {
    factors.qty.powf(weights.qty)
        * factors.rem.powf(weights.rem)
        * factors.sws.powf(weights.sws)
        * factors.cont.powf(weights.cont)
        * factors.reg.powf(weights.reg)
}

/// Geometric mean for the given index
pub fn combine(factors: &FactorScores, kind: IndexKind) -> f64 {
    weighted_geometric_mean(factors, &IndexWeights::for_index(kind))
}
