//! Payout configuration
//!
//! All multipliers are net odds ("pays N to 1"). Every field has a default,
//! so a partial config file only needs to list the house's deviations.

use serde::{Deserialize, Serialize};

/// Commission taken from winning Banker bets.
pub const DEFAULT_BANKER_COMMISSION: f64 = 0.05;

/// Chance that two same-rank pairs also match suit, assuming suits are
/// spread evenly within each rank.
pub const SAME_SUIT_PROBABILITY: f64 = 0.25;

/// Default tie point bonus table, indexed by tie point 0-9.
pub const DEFAULT_TIE_BONUS: [f64; 10] = [
    150.0, 215.0, 225.0, 200.0, 120.0, 110.0, 45.0, 45.0, 80.0, 80.0,
];

/// Tiger bet: Banker wins with six.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TigerPayout {
    pub two_cards: f64,
    pub three_cards: f64,
}

impl Default for TigerPayout {
    fn default() -> Self {
        Self {
            two_cards: 12.0,
            three_cards: 20.0,
        }
    }
}

/// Tiger Pair tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TigerPairPayout {
    pub same: f64,
    pub dual: f64,
    pub single: f64,
    /// The `same` tier also requires both pairs to share a suit. Suits are
    /// not tracked, so this applies [`SAME_SUIT_PROBABILITY`].
    pub identical_suits: bool,
}

impl Default for TigerPairPayout {
    fn default() -> Self {
        Self {
            same: 100.0,
            dual: 20.0,
            single: 4.0,
            identical_suits: false,
        }
    }
}

/// Payout multipliers for every bet the engine prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PayoutTable {
    pub player: f64,
    /// Net multiplier before commission.
    pub banker: f64,
    pub banker_commission: f64,
    pub tie: f64,
    pub player_pair: f64,
    pub banker_pair: f64,
    pub tie_bonus: [f64; 10],
    pub tiger: TigerPayout,
    pub small_tiger: f64,
    pub big_tiger: f64,
    pub tiger_tie: f64,
    pub tiger_pair: TigerPairPayout,
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self {
            player: 1.0,
            banker: 1.0,
            banker_commission: DEFAULT_BANKER_COMMISSION,
            tie: 8.0,
            player_pair: 11.0,
            banker_pair: 11.0,
            tie_bonus: DEFAULT_TIE_BONUS,
            tiger: TigerPayout::default(),
            small_tiger: 22.0,
            big_tiger: 50.0,
            tiger_tie: 35.0,
            tiger_pair: TigerPairPayout::default(),
        }
    }
}

impl PayoutTable {
    /// What a winning Banker bet actually pays after commission.
    pub fn effective_banker(&self) -> f64 {
        self.banker * (1.0 - self.banker_commission)
    }

    pub fn with_banker_commission(mut self, commission: f64) -> Self {
        self.banker_commission = commission;
        self
    }

    pub fn with_tie(mut self, tie: f64) -> Self {
        self.tie = tie;
        self
    }

    pub fn with_identical_suit_pairs(mut self, enabled: bool) -> Self {
        self.tiger_pair.identical_suits = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_banker() {
        let table = PayoutTable::default();
        assert!((table.effective_banker() - 0.95).abs() < 1e-12);
        let no_commission = table.with_banker_commission(0.0);
        assert_eq!(no_commission.effective_banker(), 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let table: PayoutTable =
            serde_json::from_str(r#"{"tie": 9, "tiger": {"three_cards": 25}}"#).unwrap();
        assert_eq!(table.tie, 9.0);
        assert_eq!(table.tiger.two_cards, 12.0);
        assert_eq!(table.tiger.three_cards, 25.0);
        assert_eq!(table.tie_bonus, DEFAULT_TIE_BONUS);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed = serde_json::from_str::<PayoutTable>(r#"{"dragon": 40}"#);
        assert!(parsed.is_err());
    }
}
