//! banco Engine - Exact combinatorial EV engine for baccarat
//!
//! Given the ranks left in the shoe, this crate enumerates every way the next
//! deal can unfold under the fixed third-card tableau, weights each deal by
//! its exact no-replacement probability and prices every main and side bet.
//!
//! The engine is a pure function of (shoe, payouts, rebate): no I/O, no
//! shared state, and bit-for-bit reproducible output.

pub mod card;
pub mod deal;
pub mod error;
pub mod ev;
pub mod outcome;
pub mod payout;
pub mod rules;

pub use card::{Rank, ShoeState, DEFAULT_DECKS, MAX_RANK_COUNT, RANKS};
pub use deal::{Deal, DealVisitor, Enumerator, Hand};
pub use error::{EngineError, ParseRankError};
pub use ev::{calculate_ev, tally, CalculationResult, EvResult, Tally};
pub use outcome::{Outcome, SixWin, TigerPair, Winner};
pub use payout::{PayoutTable, TigerPairPayout, TigerPayout};
