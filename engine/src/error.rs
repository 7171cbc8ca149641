//! Engine error types

use thiserror::Error;

/// Fewest cards that can complete a deal (two per side).
pub const MIN_DEAL_CARDS: u32 = 4;

/// Reasons a calculation is rejected before enumeration starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid shoe state: rank {rank} has count {count}")]
    InvalidShoeState { rank: u8, count: i64 },
    #[error("insufficient cards: {remaining} remaining, at least {required} needed to deal")]
    InsufficientCards { remaining: u32, required: u32 },
    #[error("rebate rate must be a finite non-negative fraction (got {0})")]
    InvalidRebate(f64),
}

/// A rank label that is not one of `A 2-9 10 T J Q K`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rank label: {0:?}")]
pub struct ParseRankError(pub String);
