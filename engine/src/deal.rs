//! Combinatorial deal enumeration
//!
//! Draws ranks without replacement in dealing order (Player1, Banker1,
//! Player2, Banker2, then the conditional third cards) and hands every fully
//! resolved deal to a [`DealVisitor`] together with its exact probability.
//!
//! Each draw of rank `r` is weighted `remaining[r] / remaining_total`, so a
//! path's weight is the product of hypergeometric steps. Branches are cut as
//! soon as the tableau ends the deal, so most paths stop at four cards.

use crate::card::{Rank, ShoeState, RANKS};
use crate::rules::{self, Tableau};

/// Most cards one side can hold.
pub const MAX_HAND_SIZE: usize = 3;

/// The 2 or 3 ranks held by one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    cards: [Rank; MAX_HAND_SIZE],
    len: u8,
}

impl Hand {
    /// Create an empty hand
    pub fn new() -> Self {
        Hand {
            cards: [Rank::ACE; MAX_HAND_SIZE],
            len: 0,
        }
    }

    /// Build a hand from up to three ranks
    pub fn from_ranks(ranks: &[Rank]) -> Self {
        assert!(ranks.len() <= MAX_HAND_SIZE, "a hand holds at most 3 cards");
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.push(rank);
        }
        hand
    }

    #[inline(always)]
    fn push(&mut self, rank: Rank) {
        self.cards[self.len as usize] = rank;
        self.len += 1;
    }

    #[inline(always)]
    fn pop(&mut self) {
        self.len -= 1;
    }

    pub fn cards(&self) -> &[Rank] {
        &self.cards[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of point values modulo 10.
    #[inline]
    pub fn total(&self) -> u8 {
        self.cards().iter().map(|r| r.point()).sum::<u8>() % 10
    }

    /// Rank of the pair formed by the first two cards, if any.
    #[inline]
    pub fn pair_rank(&self) -> Option<Rank> {
        (self.len >= 2 && self.cards[0] == self.cards[1]).then_some(self.cards[0])
    }

    pub fn is_pair(&self) -> bool {
        self.pair_rank().is_some()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

/// One fully drawn round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deal {
    pub player: Hand,
    pub banker: Hand,
}

/// Receives the stream of resolved deals.
pub trait DealVisitor {
    /// Called once per resolved deal with the deal's exact probability.
    fn visit(&mut self, deal: &Deal, probability: f64);

    /// Called with the weight of a path that needs a card the shoe no
    /// longer holds.
    fn exhausted(&mut self, _probability: f64) {}
}

/// Enumerates every legal deal from a snapshot of the shoe.
#[derive(Debug, Clone)]
pub struct Enumerator {
    counts: [u32; RANKS],
    total: u32,
}

impl Enumerator {
    /// Snapshot `shoe`; later changes to the caller's shoe are not seen.
    pub fn new(shoe: &ShoeState) -> Self {
        Enumerator {
            counts: *shoe.counts(),
            total: shoe.total(),
        }
    }

    pub fn total_cards(&self) -> u32 {
        self.total
    }

    /// Ranks that can be Player's first card, i.e. the roots of
    /// independent subtrees for [`Enumerator::walk_branch`].
    pub fn first_cards(&self) -> impl Iterator<Item = Rank> + '_ {
        Rank::ALL
            .into_iter()
            .filter(move |r| self.counts[r.index()] > 0)
    }

    /// Walk the whole enumeration.
    pub fn walk<V: DealVisitor>(&self, visitor: &mut V) {
        let mut walk = Walk::new(self, visitor);
        walk.draw_initial(0, 1.0);
    }

    /// Walk only the deals whose first Player card is `first`.
    ///
    /// Summing the subtrees of every rank in [`Enumerator::first_cards`]
    /// covers the same deals as [`Enumerator::walk`].
    pub fn walk_branch<V: DealVisitor>(&self, first: Rank, visitor: &mut V) {
        let mut walk = Walk::new(self, visitor);
        if walk.remaining == 0 {
            walk.visitor.exhausted(1.0);
            return;
        }
        if let Some(p) = walk.take(first) {
            walk.deal.player.push(first);
            walk.draw_initial(1, p);
        }
    }
}

/// Mutable state of one depth-first walk over a private copy of the counts.
struct Walk<'v, V> {
    counts: [u32; RANKS],
    remaining: u32,
    deal: Deal,
    visitor: &'v mut V,
}

impl<'v, V: DealVisitor> Walk<'v, V> {
    fn new(source: &Enumerator, visitor: &'v mut V) -> Self {
        Walk {
            counts: source.counts,
            remaining: source.total,
            deal: Deal::default(),
            visitor,
        }
    }

    /// Draw `rank` if available, returning the draw probability.
    #[inline(always)]
    fn take(&mut self, rank: Rank) -> Option<f64> {
        let count = self.counts[rank.index()];
        if count == 0 {
            return None;
        }
        let p = count as f64 / self.remaining as f64;
        self.counts[rank.index()] -= 1;
        self.remaining -= 1;
        Some(p)
    }

    #[inline(always)]
    fn put_back(&mut self, rank: Rank) {
        self.counts[rank.index()] += 1;
        self.remaining += 1;
    }

    /// Slots 0-3 alternate Player, Banker.
    fn draw_initial(&mut self, slot: usize, weight: f64) {
        if slot == 4 {
            self.settle(weight);
            return;
        }
        if self.remaining == 0 {
            self.visitor.exhausted(weight);
            return;
        }
        for rank in Rank::ALL {
            let Some(p) = self.take(rank) else { continue };
            let hand = if slot % 2 == 0 {
                &mut self.deal.player
            } else {
                &mut self.deal.banker
            };
            hand.push(rank);
            self.draw_initial(slot + 1, weight * p);
            if slot % 2 == 0 {
                self.deal.player.pop();
            } else {
                self.deal.banker.pop();
            }
            self.put_back(rank);
        }
    }

    fn settle(&mut self, weight: f64) {
        match rules::tableau(self.deal.player.total(), self.deal.banker.total()) {
            Tableau::Natural | Tableau::PlayerStands { banker_draws: false } => {
                self.visitor.visit(&self.deal, weight);
            }
            Tableau::PlayerStands { banker_draws: true } => self.banker_third(weight),
            Tableau::PlayerDraws => self.player_third(weight),
        }
    }

    fn player_third(&mut self, weight: f64) {
        if self.remaining == 0 {
            self.visitor.exhausted(weight);
            return;
        }
        let banker_total = self.deal.banker.total();
        for rank in Rank::ALL {
            let Some(p) = self.take(rank) else { continue };
            self.deal.player.push(rank);
            if rules::banker_draws_after(banker_total, rank.point()) {
                self.banker_third(weight * p);
            } else {
                self.visitor.visit(&self.deal, weight * p);
            }
            self.deal.player.pop();
            self.put_back(rank);
        }
    }

    fn banker_third(&mut self, weight: f64) {
        if self.remaining == 0 {
            self.visitor.exhausted(weight);
            return;
        }
        for rank in Rank::ALL {
            let Some(p) = self.take(rank) else { continue };
            self.deal.banker.push(rank);
            self.visitor.visit(&self.deal, weight * p);
            self.deal.banker.pop();
            self.put_back(rank);
        }
    }
}
