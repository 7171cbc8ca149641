//! Card ranks and shoe composition
//!
//! Baccarat outcomes depend only on rank, so the shoe is tracked as 13
//! per-rank counts rather than as physical cards.

use crate::error::{EngineError, ParseRankError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of distinct ranks (Ace through King).
pub const RANKS: usize = 13;

/// Cards of each rank in a single 52-card deck.
pub const CARDS_PER_RANK_PER_DECK: u32 = 4;

/// Decks in a standard baccarat shoe.
pub const DEFAULT_DECKS: u32 = 8;

/// Largest per-rank count a calculation accepts. Keeps the shoe total
/// within `u32`.
pub const MAX_RANK_COUNT: u32 = u32::MAX / RANKS as u32;

/// A card rank, 1 (Ace) through 13 (King).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const TEN: Rank = Rank(10);
    pub const KING: Rank = Rank(13);

    /// Every rank in ascending order.
    pub const ALL: [Rank; RANKS] = [
        Rank(1),
        Rank(2),
        Rank(3),
        Rank(4),
        Rank(5),
        Rank(6),
        Rank(7),
        Rank(8),
        Rank(9),
        Rank(10),
        Rank(11),
        Rank(12),
        Rank(13),
    ];

    /// Create a rank from its identifier 1-13
    pub fn new(value: u8) -> Self {
        assert!((1..=13).contains(&value), "Rank value must be 1-13");
        Rank(value)
    }

    /// Create a rank, returning `None` outside 1-13
    pub fn try_new(value: u8) -> Option<Self> {
        (1..=13).contains(&value).then_some(Rank(value))
    }

    /// Get the raw rank identifier (1-13)
    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-rank tables.
    #[inline(always)]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Baccarat point value: face value for 1-9, zero for tens and court cards.
    #[inline(always)]
    pub fn point(self) -> u8 {
        if self.0 < 10 {
            self.0
        } else {
            0
        }
    }

    pub fn label(self) -> &'static str {
        const LABELS: [&str; RANKS] = [
            "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
        ];
        LABELS[self.index()]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let rank = match label.to_ascii_uppercase().as_str() {
            "A" | "1" => 1,
            "T" | "10" => 10,
            "J" => 11,
            "Q" => 12,
            "K" => 13,
            other => match other.parse::<u8>() {
                Ok(v @ 2..=9) => v,
                _ => return Err(ParseRankError(label.to_string())),
            },
        };
        Ok(Rank(rank))
    }
}

/// Remaining card counts per rank.
///
/// Callers mutate their own copy between calculations; the engine only ever
/// reads a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShoeState {
    counts: [u32; RANKS],
}

impl ShoeState {
    /// A shoe with no cards in it.
    pub fn empty() -> Self {
        ShoeState { counts: [0; RANKS] }
    }

    /// A freshly shuffled shoe of `decks` full decks.
    pub fn full(decks: u32) -> Self {
        ShoeState {
            counts: [decks.saturating_mul(CARDS_PER_RANK_PER_DECK); RANKS],
        }
    }

    /// Build from counts indexed by `Rank::index`.
    pub fn from_counts(counts: [u32; RANKS]) -> Self {
        ShoeState { counts }
    }

    /// Build from signed counts, as supplied by form-style callers.
    ///
    /// Negative entries and entries above [`MAX_RANK_COUNT`] are rejected
    /// with `InvalidShoeState`.
    pub fn try_from_signed(counts: [i64; RANKS]) -> Result<Self, EngineError> {
        let mut checked = [0u32; RANKS];
        for ((rank, &count), slot) in Rank::ALL.iter().zip(counts.iter()).zip(checked.iter_mut()) {
            *slot = u32::try_from(count)
                .ok()
                .filter(|&c| c <= MAX_RANK_COUNT)
                .ok_or(EngineError::InvalidShoeState {
                    rank: rank.value(),
                    count,
                })?;
        }
        Ok(ShoeState { counts: checked })
    }

    /// Reject any rank holding more than [`MAX_RANK_COUNT`] cards.
    pub fn check_counts(&self) -> Result<(), EngineError> {
        match Rank::ALL.iter().find(|r| self.count(**r) > MAX_RANK_COUNT) {
            Some(rank) => Err(EngineError::InvalidShoeState {
                rank: rank.value(),
                count: i64::from(self.count(*rank)),
            }),
            None => Ok(()),
        }
    }

    pub fn counts(&self) -> &[u32; RANKS] {
        &self.counts
    }

    pub fn count(&self, rank: Rank) -> u32 {
        self.counts[rank.index()]
    }

    pub fn set_count(&mut self, rank: Rank, count: u32) {
        self.counts[rank.index()] = count;
    }

    /// Total cards remaining, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0u32, |sum, &c| sum.saturating_add(c))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Remove one card of `rank`. Returns false if none are left.
    pub fn remove(&mut self, rank: Rank) -> bool {
        let slot = &mut self.counts[rank.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Return one card of `rank` to the shoe.
    pub fn add(&mut self, rank: Rank) {
        let slot = &mut self.counts[rank.index()];
        *slot = slot.saturating_add(1);
    }

    /// Copy of this shoe with every card of `rank` taken out.
    pub fn without_rank(&self, rank: Rank) -> Self {
        let mut shoe = *self;
        shoe.counts[rank.index()] = 0;
        shoe
    }
}

impl Default for ShoeState {
    fn default() -> Self {
        Self::full(DEFAULT_DECKS)
    }
}

impl fmt::Display for ShoeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in Rank::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", rank, self.count(*rank))?;
        }
        Ok(())
    }
}
