//! Probability aggregation and EV pricing
//!
//! The enumeration is split by Player's first card into independent subtrees
//! that run on the rayon pool. Partial tallies are merged in rank order, so
//! the floating-point summation order (and therefore every output bit) does
//! not depend on scheduling.
//!
//! Pricing: `ev = p * payout - p_lose + rebate * p_resolved`. Player and
//! Banker push on a tie; every other bet loses whenever it does not win. Mass
//! from deals the shoe cannot complete is a void round: no win, no loss and no
//! turnover, so it earns no rebate either.

use crate::card::{Rank, ShoeState};
use crate::deal::{Deal, DealVisitor, Enumerator};
use crate::error::{EngineError, MIN_DEAL_CARDS};
use crate::outcome::{Outcome, SixWin, TigerPair, Winner, TIGER_POINT};
use crate::payout::{PayoutTable, SAME_SUIT_PROBABILITY};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

/// Probability mass accumulated per bet category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub player: f64,
    pub banker: f64,
    pub tie: f64,
    pub tie_points: [f64; 10],
    pub player_pair: f64,
    pub banker_pair: f64,
    pub six_two_cards: f64,
    pub six_three_cards: f64,
    pub pair_single: f64,
    pub pair_dual: f64,
    pub pair_same: f64,
    /// Mass of paths that ran out of cards.
    pub exhausted: f64,
    /// Resolved deals visited.
    pub deals: u64,
}

impl Tally {
    /// Add one classified deal.
    #[inline]
    pub fn record(&mut self, outcome: &Outcome, probability: f64) {
        self.deals += 1;
        match outcome.winner {
            Winner::Player => self.player += probability,
            Winner::Banker => self.banker += probability,
            Winner::Tie { point } => {
                self.tie += probability;
                self.tie_points[point as usize] += probability;
            }
        }
        if outcome.player_pair {
            self.player_pair += probability;
        }
        if outcome.banker_pair {
            self.banker_pair += probability;
        }
        match outcome.banker_six {
            Some(SixWin::TwoCards) => self.six_two_cards += probability,
            Some(SixWin::ThreeCards) => self.six_three_cards += probability,
            None => {}
        }
        match outcome.tiger_pair {
            TigerPair::Single => self.pair_single += probability,
            TigerPair::Dual => self.pair_dual += probability,
            TigerPair::Same => self.pair_same += probability,
            TigerPair::None => {}
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        self.player += other.player;
        self.banker += other.banker;
        self.tie += other.tie;
        for (mine, theirs) in self.tie_points.iter_mut().zip(other.tie_points.iter()) {
            *mine += theirs;
        }
        self.player_pair += other.player_pair;
        self.banker_pair += other.banker_pair;
        self.six_two_cards += other.six_two_cards;
        self.six_three_cards += other.six_three_cards;
        self.pair_single += other.pair_single;
        self.pair_dual += other.pair_dual;
        self.pair_same += other.pair_same;
        self.exhausted += other.exhausted;
        self.deals += other.deals;
    }

    /// Mass of deals that reached a result.
    pub fn resolved(&self) -> f64 {
        self.player + self.banker + self.tie
    }

    /// Turn accumulated mass into priced bets.
    pub fn price(&self, total_cards: u32, payouts: &PayoutTable, rebate: f64) -> CalculationResult {
        let resolved = self.resolved();
        // Rebate is paid on turnover, and void rounds have none
        let rebate = rebate * resolved;
        let single = |label: &str, p: f64, payout: f64| {
            EvResult::priced(label, p, payout, resolved - p, rebate)
        };

        let player = EvResult::priced("Player", self.player, payouts.player, self.banker, rebate);
        let banker = EvResult::priced(
            "Banker",
            self.banker,
            payouts.effective_banker(),
            self.player,
            rebate,
        );

        let tie_bonuses = self
            .tie_points
            .iter()
            .zip(payouts.tie_bonus.iter())
            .enumerate()
            .map(|(point, (&p, &payout))| single(&format!("{point} Tie Bonus"), p, payout))
            .collect();

        let tiger_pair_tiers = if payouts.tiger_pair.identical_suits {
            vec![
                (self.pair_single, payouts.tiger_pair.single),
                (self.pair_dual, payouts.tiger_pair.dual),
                (self.pair_same * SAME_SUIT_PROBABILITY, payouts.tiger_pair.same),
                (self.pair_same * (1.0 - SAME_SUIT_PROBABILITY), payouts.tiger_pair.dual),
            ]
        } else {
            vec![
                (self.pair_single, payouts.tiger_pair.single),
                (self.pair_dual, payouts.tiger_pair.dual),
                (self.pair_same, payouts.tiger_pair.same),
            ]
        };

        CalculationResult {
            total_cards,
            player,
            banker,
            tie: single("Tie", self.tie, payouts.tie),
            player_pair: single("Player Pair", self.player_pair, payouts.player_pair),
            banker_pair: single("Banker Pair", self.banker_pair, payouts.banker_pair),
            tie_bonuses,
            tiger: EvResult::tiered(
                "Tiger",
                &[
                    (self.six_two_cards, payouts.tiger.two_cards),
                    (self.six_three_cards, payouts.tiger.three_cards),
                ],
                resolved,
                rebate,
            ),
            small_tiger: single("Small Tiger", self.six_two_cards, payouts.small_tiger),
            big_tiger: single("Big Tiger", self.six_three_cards, payouts.big_tiger),
            tiger_tie: single(
                "Tiger Tie",
                self.tie_points[TIGER_POINT as usize],
                payouts.tiger_tie,
            ),
            tiger_pair: EvResult::tiered("Tiger Pair", &tiger_pair_tiers, resolved, rebate),
            unresolved: self.exhausted,
            deals: self.deals,
        }
    }
}

impl DealVisitor for Tally {
    #[inline]
    fn visit(&mut self, deal: &Deal, probability: f64) {
        self.record(&Outcome::classify(deal), probability);
    }

    fn exhausted(&mut self, probability: f64) {
        self.exhausted += probability;
    }
}

/// Exact probability and EV of one bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvResult {
    pub label: String,
    /// Chance the bet wins (any tier).
    pub probability: f64,
    /// Net payout on a win; for tiered bets, the probability-weighted mean.
    pub payout: f64,
    /// Expected net return per unit staked, rebate included.
    pub ev: f64,
}

impl EvResult {
    /// `rebate` is already scaled to the resolved mass.
    fn priced(label: &str, probability: f64, payout: f64, lose: f64, rebate: f64) -> Self {
        EvResult {
            label: label.to_string(),
            probability,
            payout,
            ev: probability * payout - lose + rebate,
        }
    }

    /// A bet paying different multipliers on disjoint winning outcomes.
    fn tiered(label: &str, tiers: &[(f64, f64)], resolved: f64, rebate: f64) -> Self {
        let probability: f64 = tiers.iter().map(|&(p, _)| p).sum();
        let returned: f64 = tiers.iter().map(|&(p, payout)| p * payout).sum();
        let payout = if probability > 0.0 {
            returned / probability
        } else {
            tiers.first().map_or(0.0, |&(_, payout)| payout)
        };
        EvResult {
            label: label.to_string(),
            probability,
            payout,
            ev: returned - (resolved - probability) + rebate,
        }
    }
}

/// Every priced bet for one shoe snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_cards: u32,
    pub player: EvResult,
    pub banker: EvResult,
    pub tie: EvResult,
    pub player_pair: EvResult,
    pub banker_pair: EvResult,
    /// Indexed by tie point 0-9.
    pub tie_bonuses: Vec<EvResult>,
    pub tiger: EvResult,
    pub small_tiger: EvResult,
    pub big_tiger: EvResult,
    pub tiger_tie: EvResult,
    pub tiger_pair: EvResult,
    /// Probability that the next deal cannot be completed from this shoe.
    pub unresolved: f64,
    /// Resolved deals enumerated.
    pub deals: u64,
}

impl CalculationResult {
    /// Every bet, main bets first.
    pub fn bets(&self) -> Vec<&EvResult> {
        let mut bets = vec![
            &self.player,
            &self.banker,
            &self.tie,
            &self.player_pair,
            &self.banker_pair,
        ];
        bets.extend(self.tie_bonuses.iter());
        bets.extend([
            &self.tiger,
            &self.small_tiger,
            &self.big_tiger,
            &self.tiger_tie,
            &self.tiger_pair,
        ]);
        bets
    }
}

/// Enumerate every deal from `shoe` and accumulate category mass.
pub fn tally(shoe: &ShoeState) -> Tally {
    let enumerator = Enumerator::new(shoe);
    let firsts: Vec<Rank> = enumerator.first_cards().collect();
    if firsts.is_empty() {
        return Tally {
            exhausted: 1.0,
            ..Tally::default()
        };
    }

    let parts: Vec<Tally> = firsts
        .par_iter()
        .map(|&rank| {
            let mut part = Tally::default();
            enumerator.walk_branch(rank, &mut part);
            trace!(first = %rank, deals = part.deals, "branch enumerated");
            part
        })
        .collect();

    let mut total = Tally::default();
    for part in &parts {
        total.merge(part);
    }
    total
}

/// Reject inputs the enumeration cannot price.
pub fn validate(shoe: &ShoeState, rebate: f64) -> Result<(), EngineError> {
    if !rebate.is_finite() || rebate < 0.0 {
        return Err(EngineError::InvalidRebate(rebate));
    }
    shoe.check_counts()?;
    let total_cards = shoe.total();
    if total_cards < MIN_DEAL_CARDS {
        return Err(EngineError::InsufficientCards {
            remaining: total_cards,
            required: MIN_DEAL_CARDS,
        });
    }
    Ok(())
}

/// Exact probabilities and EVs for every bet on the next deal.
///
/// `rebate` is the rolling fraction returned on turnover (0.014 for 1.4%).
pub fn calculate_ev(
    shoe: &ShoeState,
    payouts: &PayoutTable,
    rebate: f64,
) -> Result<CalculationResult, EngineError> {
    validate(shoe, rebate)?;
    let total_cards = shoe.total();
    let started = Instant::now();
    let tally = tally(shoe);
    debug!(
        total_cards,
        deals = tally.deals,
        unresolved = tally.exhausted,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "shoe evaluated"
    );
    Ok(tally.price(total_cards, payouts, rebate))
}
