//! Live shoe counting
//!
//! The tracker is the only place the shoe is mutated. Calculations always
//! receive a [`ShoeTracker::snapshot`], never a reference to the live counts.

use banco_engine::{Rank, ShoeState, DEFAULT_DECKS};
use tracing::debug;

/// Counts the cards seen so far in one shoe.
#[derive(Debug, Clone)]
pub struct ShoeTracker {
    decks: u32,
    shoe: ShoeState,
}

impl ShoeTracker {
    /// Start tracking a fresh shoe of `decks` decks
    pub fn new(decks: u32) -> Self {
        ShoeTracker {
            decks,
            shoe: ShoeState::full(decks),
        }
    }

    /// Resume tracking from known counts.
    pub fn from_shoe(decks: u32, shoe: ShoeState) -> Self {
        ShoeTracker { decks, shoe }
    }

    pub fn decks(&self) -> u32 {
        self.decks
    }

    pub fn count(&self, rank: Rank) -> u32 {
        self.shoe.count(rank)
    }

    pub fn remaining(&self) -> u32 {
        self.shoe.total()
    }

    /// Put one card of `rank` back (correcting a mis-click).
    pub fn increment(&mut self, rank: Rank) {
        self.shoe.add(rank);
    }

    /// Mark one card of `rank` as dealt. Stays at zero when none are left.
    pub fn decrement(&mut self, rank: Rank) -> bool {
        self.shoe.remove(rank)
    }

    /// Mark every card of a dealt round as seen.
    ///
    /// Returns the cards that could not be removed because the tracker
    /// already counted that rank as exhausted.
    pub fn record(&mut self, cards: &[Rank]) -> Vec<Rank> {
        let missing: Vec<Rank> = cards
            .iter()
            .copied()
            .filter(|&rank| !self.shoe.remove(rank))
            .collect();
        if !missing.is_empty() {
            debug!(?missing, "cards recorded past zero");
        }
        missing
    }

    /// Back to a full shoe.
    pub fn reset(&mut self) {
        self.shoe = ShoeState::full(self.decks);
    }

    /// Owned copy of the current counts.
    pub fn snapshot(&self) -> ShoeState {
        self.shoe
    }
}

impl Default for ShoeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DECKS)
    }
}
