//! Kelly stake sizing and bet recommendations

use banco_engine::{CalculationResult, EvResult};
use serde::Serialize;

/// Fraction of bankroll the Kelly criterion stakes on `bet`.
///
/// Edge over net odds; zero for any bet without a positive edge.
pub fn kelly_fraction(bet: &EvResult) -> f64 {
    if bet.ev <= 0.0 || bet.payout <= 0.0 {
        return 0.0;
    }
    bet.ev / bet.payout
}

/// Turns EVs into whole-unit stakes for a bankroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KellySizer {
    pub bankroll: f64,
    /// 1.0 is full Kelly, 0.5 half Kelly.
    pub multiplier: f64,
}

impl KellySizer {
    pub fn new(bankroll: f64) -> Self {
        KellySizer {
            bankroll,
            multiplier: 1.0,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Recommended stake, rounded down.
    pub fn stake(&self, bet: &EvResult) -> u64 {
        let stake = (self.bankroll * self.multiplier * kelly_fraction(bet)).floor();
        if stake.is_finite() && stake > 0.0 {
            stake as u64
        } else {
            0
        }
    }
}

/// A positive-EV bet with its stake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub label: String,
    pub probability: f64,
    pub ev: f64,
    pub stake: u64,
}

/// Every positive-EV bet, best EV first.
pub fn recommend(result: &CalculationResult, sizer: &KellySizer) -> Vec<Recommendation> {
    let mut picks: Vec<Recommendation> = result
        .bets()
        .into_iter()
        .filter(|bet| bet.ev > 0.0)
        .map(|bet| Recommendation {
            label: bet.label.clone(),
            probability: bet.probability,
            ev: bet.ev,
            stake: sizer.stake(bet),
        })
        .collect();
    picks.sort_by(|a, b| b.ev.total_cmp(&a.ev));
    picks
}
